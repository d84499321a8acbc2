//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the shared pool; one statement per operation
//! - Joined list queries aggregate ratings in SQL (no N+1)
//! - Failures are logged here and propagated as [`DbError`](super::DbError)

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;
