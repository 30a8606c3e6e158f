//! Property search query builder
//!
//! Each supplied filter becomes an independent predicate that binds its own
//! parameter. Predicates are joined with AND under a single WHERE, so any
//! combination of filters produces valid SQL. The rating threshold applies
//! after aggregation (HAVING). A price bound with no minor-unit value is
//! rejected before any SQL is built.

use sqlx::{Postgres, QueryBuilder};

use crate::error::{GatewayError, GatewayResult, Operation};
use crate::models::{to_minor_units, PropertyFilter};

const LISTING_SELECT: &str = r#"SELECT
    p.id, p.owner_id, p.title, p.description,
    p.thumbnail_photo_url, p.cover_photo_url, p.cost_per_night,
    p.street, p.city, p.province, p.post_code, p.country,
    p.parking_spaces, p.number_of_bathrooms, p.number_of_bedrooms,
    avg(pr.rating)::float8 AS average_rating
FROM properties p
LEFT JOIN property_reviews pr ON pr.property_id = p.id"#;

/// Row-level (pre-aggregation) filter.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Owner(i32),
    /// LIKE pattern, already wrapped and escaped.
    CityLike(String),
    CostAtLeast(i32),
    CostAtMost(i32),
}

/// Builds the search statement for a [`PropertyFilter`].
#[derive(Debug, Clone)]
pub struct PropertySearch<'a> {
    filter: &'a PropertyFilter,
    limit: u32,
}

impl<'a> PropertySearch<'a> {
    pub fn new(filter: &'a PropertyFilter, limit: u32) -> Self {
        Self { filter, limit }
    }

    fn predicates(&self) -> GatewayResult<Vec<Predicate>> {
        let mut predicates = Vec::new();

        if let Some(owner_id) = self.filter.owner_id {
            predicates.push(Predicate::Owner(owner_id));
        }
        if let Some(city) = self.filter.city.as_deref().filter(|c| !c.is_empty()) {
            predicates.push(Predicate::CityLike(contains_pattern(city)));
        }
        if let Some(min) = self.filter.min_price_per_night {
            predicates.push(Predicate::CostAtLeast(price_bound(min)?));
        }
        if let Some(max) = self.filter.max_price_per_night {
            predicates.push(Predicate::CostAtMost(price_bound(max)?));
        }

        Ok(predicates)
    }

    /// Assemble the statement with all parameters bound.
    pub fn build(&self) -> GatewayResult<QueryBuilder<'static, Postgres>> {
        let predicates = self.predicates()?;
        let mut builder = QueryBuilder::new(LISTING_SELECT);

        if !predicates.is_empty() {
            builder.push(" WHERE ");
            let mut clauses = builder.separated(" AND ");
            for predicate in predicates {
                match predicate {
                    Predicate::Owner(owner_id) => {
                        clauses.push("p.owner_id = ").push_bind_unseparated(owner_id)
                    }
                    Predicate::CityLike(pattern) => {
                        clauses.push("p.city LIKE ").push_bind_unseparated(pattern)
                    }
                    Predicate::CostAtLeast(cents) => {
                        clauses.push("p.cost_per_night >= ").push_bind_unseparated(cents)
                    }
                    Predicate::CostAtMost(cents) => {
                        clauses.push("p.cost_per_night <= ").push_bind_unseparated(cents)
                    }
                };
            }
        }

        builder.push(" GROUP BY p.id");

        // NULL average (no reviews) never satisfies the comparison
        if let Some(rating) = self.filter.min_rating {
            builder.push(" HAVING avg(pr.rating)::float8 >= ");
            builder.push_bind(rating);
        }

        builder.push(" ORDER BY p.cost_per_night, p.id LIMIT ");
        builder.push_bind(i64::from(self.limit));

        Ok(builder)
    }
}

fn price_bound(major: f64) -> GatewayResult<i32> {
    to_minor_units(major).ok_or(GatewayError::InvalidPrice {
        operation: Operation::SearchProperties,
        value: major,
    })
}

/// Wrap `text` in `%...%`, escaping LIKE metacharacters so they match literally.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
