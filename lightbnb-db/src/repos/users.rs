//! User repository
//!
//! Lookups by email and id, and user creation.

use sqlx::PgPool;

use crate::error::{GatewayResult, Operation, ResultExt};
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by exact email.
    ///
    /// Email uniqueness is up to the schema; if several rows match, the one
    /// with the lowest id wins.
    pub async fn find_by_email(&self, email: &str) -> GatewayResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .during(Operation::FindUserByEmail)
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i32) -> GatewayResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .during(Operation::FindUserById)
    }

    /// Insert a user and return the stored row, including its generated id.
    pub async fn create(&self, user: &NewUser) -> GatewayResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(self.pool)
        .await
        .during(Operation::CreateUser)
    }
}
