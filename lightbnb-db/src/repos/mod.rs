//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and follows these patterns:
//! - One statement per call, parameters bound positionally
//! - Inserts use RETURNING so callers get the stored row back
//! - Zero rows is `Ok(None)` / empty `Vec`, never an error

pub mod properties;
pub mod reservations;
pub mod search;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use search::PropertySearch;
pub use users::UserRepo;
