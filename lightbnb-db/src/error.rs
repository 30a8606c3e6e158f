//! Error types for lightbnb-db
//!
//! Every gateway operation returns `Result<T, GatewayError>`. An empty result
//! (no matching row, no reservations) is never an error.

use std::fmt;

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway operation that issued a failing statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FindUserByEmail,
    FindUserById,
    CreateUser,
    ListReservationsForGuest,
    SearchProperties,
    CreateProperty,
    Ping,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FindUserByEmail => "find_user_by_email",
            Operation::FindUserById => "find_user_by_id",
            Operation::CreateUser => "create_user",
            Operation::ListReservationsForGuest => "list_reservations_for_guest",
            Operation::SearchProperties => "search_properties",
            Operation::CreateProperty => "create_property",
            Operation::Ping => "ping",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{operation} failed: {source}")]
    Query {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("invalid database configuration: {0}")]
    Config(String),

    /// Price that has no minor-unit representation (NaN, infinite, or too large).
    #[error("{operation} rejected price {value}: not a finite amount in range")]
    InvalidPrice { operation: Operation, value: f64 },
}

impl GatewayError {
    /// Operation that failed, if the error came from a statement.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            GatewayError::Query { operation, .. }
            | GatewayError::InvalidPrice { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// True when the database rejected a row for a unique constraint
    /// (e.g. a duplicate email when the schema enforces one).
    pub fn is_unique_violation(&self) -> bool {
        self.database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
    }

    /// True when a referenced row (owner, guest, property) does not exist.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.database_error()
            .map(|db| db.is_foreign_key_violation())
            .unwrap_or(false)
    }

    fn database_error(&self) -> Option<&dyn sqlx::error::DatabaseError> {
        match self {
            GatewayError::Query {
                source: sqlx::Error::Database(db),
                ..
            } => Some(&**db),
            _ => None,
        }
    }
}

/// Attach the gateway operation to a raw sqlx result.
pub trait ResultExt<T> {
    fn during(self, operation: Operation) -> GatewayResult<T>;
}

impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn during(self, operation: Operation) -> GatewayResult<T> {
        self.map_err(|source| GatewayError::Query { operation, source })
    }
}
