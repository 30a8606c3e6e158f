//! User records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User row from `users`.
///
/// The password column is opaque credential text. It is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Fields for a new `users` row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
