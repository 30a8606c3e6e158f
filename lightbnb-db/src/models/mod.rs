//! Row and write models for the LightBnB tables
//!
//! These are passive records. Nothing here validates input; callers own
//! required-field and range checks.

pub mod money;
pub mod property;
pub mod reservation;
pub mod user;

pub use money::{to_major_units, to_minor_units, MINOR_UNITS_PER_MAJOR};
pub use property::{NewProperty, Property, PropertyFilter, PropertyListing};
pub use reservation::ReservationListing;
pub use user::{NewUser, User};

/// Default row cap for list operations.
pub const DEFAULT_LIMIT: u32 = 10;
