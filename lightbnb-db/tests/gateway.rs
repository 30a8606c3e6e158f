//! Gateway tests against a real PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored
//!
//! Each test gets a fresh database loaded from fixtures/schema.sql and
//! fixtures/listings.sql.

use anyhow::Result;
use lightbnb_db::{
    GatewayError, NewProperty, NewUser, Operation, PropertyFilter, QueryGateway, DEFAULT_LIMIT,
};
use sqlx::PgPool;

fn ids<T>(rows: &[T], id: impl Fn(&T) -> i32) -> Vec<i32> {
    rows.iter().map(id).collect()
}

// === Users ===

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn finds_user_by_email(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    let user = gateway
        .find_user_by_email("tristanjacobs@gmail.com")
        .await?
        .expect("user should exist");
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Devin Sanders");

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn unknown_email_is_none_not_error(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    assert!(gateway.find_user_by_email("nobody@example.com").await?.is_none());
    // Exact match only
    assert!(gateway.find_user_by_email("TristanJacobs@gmail.com").await?.is_none());
    assert!(gateway.find_user_by_id(999).await?.is_none());

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn created_user_round_trips(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let new_user = NewUser {
        name: "Kavi Lowe".into(),
        email: "kavi@example.com".into(),
        password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".into(),
    };

    let created = gateway.create_user(&new_user).await?;
    assert!(created.id > 4, "id should come from the sequence");

    let found = gateway
        .find_user_by_id(created.id)
        .await?
        .expect("created user should be readable");
    assert_eq!(found, created);
    assert_eq!(found.name, new_user.name);
    assert_eq!(found.email, new_user.email);
    assert_eq!(found.password, new_user.password);

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn duplicate_email_returns_lowest_id(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    // The fixture schema does not enforce unique emails
    let duplicate = gateway
        .create_user(&NewUser {
            name: "Second Devin".into(),
            email: "tristanjacobs@gmail.com".into(),
            password: "password".into(),
        })
        .await?;
    assert!(duplicate.id > 4);

    let user = gateway
        .find_user_by_email("tristanjacobs@gmail.com")
        .await?
        .expect("user should exist");
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Devin Sanders");

    Ok(())
}

// === Reservations ===

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn reservations_ordered_by_start_date(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    let reservations = gateway.list_reservations_for_guest(1, DEFAULT_LIMIT).await?;
    assert_eq!(ids(&reservations, |r| r.reservation_id), vec![4, 1, 2, 3]);

    let first = &reservations[0];
    assert_eq!(first.property.id, 5);
    assert_eq!(first.average_rating, Some(4.0));
    assert_eq!(first.nights(), 3);

    // Property 3 has no reviews but the reservation is still listed
    let unreviewed = &reservations[3];
    assert_eq!(unreviewed.property.id, 3);
    assert_eq!(unreviewed.average_rating, None);

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn reservations_respect_limit(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    let reservations = gateway.list_reservations_for_guest(1, 2).await?;
    assert_eq!(ids(&reservations, |r| r.reservation_id), vec![4, 1]);

    assert!(gateway.list_reservations_for_guest(1, 0).await?.is_empty());

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn guest_without_reservations_gets_empty_list(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    assert!(gateway.list_reservations_for_guest(3, DEFAULT_LIMIT).await?.is_empty());
    assert!(gateway.list_reservations_for_guest(999, DEFAULT_LIMIT).await?.is_empty());

    Ok(())
}

// === Property search ===

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn unfiltered_search_is_cheapest_first(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    let listings = gateway
        .search_properties(&PropertyFilter::default(), DEFAULT_LIMIT)
        .await?;
    assert_eq!(ids(&listings, |l| l.property.id), vec![3, 1, 7, 5, 6, 2, 4]);

    let limited = gateway.search_properties(&PropertyFilter::default(), 2).await?;
    assert_eq!(ids(&limited, |l| l.property.id), vec![3, 1]);

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn price_range_is_inclusive_in_major_units(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let filter = PropertyFilter::default().price_between(Some(50.0), Some(150.0));

    let listings = gateway.search_properties(&filter, DEFAULT_LIMIT).await?;
    assert_eq!(ids(&listings, |l| l.property.id), vec![1, 7, 5, 6, 2]);
    assert!(listings
        .iter()
        .all(|l| (5_000..=15_000).contains(&l.property.cost_per_night)));

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn city_is_case_sensitive_substring(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let filter = PropertyFilter::default().city("Vancouver");

    let listings = gateway.search_properties(&filter, DEFAULT_LIMIT).await?;
    let mut found = ids(&listings, |l| l.property.id);
    found.sort();
    // 6 is "vancouver" (lowercase), 5 is Calgary
    assert_eq!(found, vec![1, 2, 3, 4, 7]);
    assert!(listings.iter().any(|l| l.property.city == "North Vancouver"));

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn min_rating_excludes_low_and_unreviewed(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let filter = PropertyFilter::default().min_rating(4.0);

    let listings = gateway.search_properties(&filter, DEFAULT_LIMIT).await?;
    assert_eq!(ids(&listings, |l| l.property.id), vec![1, 7, 5, 6, 4]);
    assert!(listings
        .iter()
        .all(|l| l.average_rating.is_some_and(|avg| avg >= 4.0)));

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn owner_city_and_min_price_combine(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let filter = PropertyFilter::default()
        .owner(4)
        .city("Vancouver")
        .price_between(Some(50.0), None);

    let listings = gateway.search_properties(&filter, DEFAULT_LIMIT).await?;
    assert_eq!(ids(&listings, |l| l.property.id), vec![1, 2]);
    assert!(listings.iter().all(|l| l.property.owner_id == 4));

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn like_metacharacters_match_literally(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    let listings = gateway
        .search_properties(&PropertyFilter::default().city("%"), DEFAULT_LIMIT)
        .await?;
    assert!(listings.is_empty());

    Ok(())
}

// === Property creation ===

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn created_property_stores_minor_units(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let new_property = NewProperty {
        owner_id: 3,
        title: "Nature by the lake".into(),
        description: None,
        thumbnail_photo_url: "https://images.pexels.com/photos/2086676/thumb.jpeg".into(),
        cover_photo_url: "https://images.pexels.com/photos/2086676/cover.jpeg".into(),
        cost_per_night: 930.61,
        street: "536 Namsub Highway".into(),
        city: "Sotboske".into(),
        province: "Quebec".into(),
        post_code: "28142".into(),
        country: "Canada".into(),
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
    };

    let created = gateway.create_property(&new_property).await?;
    assert!(created.id > 7);
    assert_eq!(created.cost_per_night, 93_061);
    assert_eq!(created.owner_id, 3);
    assert_eq!(created.description, None);

    let listings = gateway
        .search_properties(&PropertyFilter::default().owner(3), DEFAULT_LIMIT)
        .await?;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property, created);
    assert_eq!(listings[0].average_rating, None);

    Ok(())
}

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn unknown_owner_is_a_foreign_key_error(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    let new_property = NewProperty {
        owner_id: 999,
        title: "Nowhere".into(),
        description: Some("description".into()),
        thumbnail_photo_url: "thumb".into(),
        cover_photo_url: "cover".into(),
        cost_per_night: 10.0,
        street: "1 Nowhere Lane".into(),
        city: "Nowhere".into(),
        province: "Nunavut".into(),
        post_code: "00000".into(),
        country: "Canada".into(),
        parking_spaces: 0,
        number_of_bathrooms: 0,
        number_of_bedrooms: 0,
    };

    let err = gateway.create_property(&new_property).await.unwrap_err();
    assert_eq!(err.operation(), Some(Operation::CreateProperty));
    assert!(err.is_foreign_key_violation());

    Ok(())
}

// === Failures ===

#[sqlx::test(migrations = false, fixtures("schema", "listings"))]
#[ignore = "requires database"]
async fn failures_are_errors_not_empty_results(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);
    gateway.close().await;

    let err = gateway
        .find_user_by_email("tristanjacobs@gmail.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Query {
            operation: Operation::FindUserByEmail,
            ..
        }
    ));

    let err = gateway
        .search_properties(&PropertyFilter::default(), DEFAULT_LIMIT)
        .await
        .unwrap_err();
    assert_eq!(err.operation(), Some(Operation::SearchProperties));

    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn missing_tables_surface_as_errors(pool: PgPool) -> Result<()> {
    let gateway = QueryGateway::new(pool);

    let err = gateway.list_reservations_for_guest(1, DEFAULT_LIMIT).await.unwrap_err();
    assert_eq!(err.operation(), Some(Operation::ListReservationsForGuest));
    assert!(err.to_string().starts_with("list_reservations_for_guest failed:"));

    Ok(())
}
