//! Domain records for users, properties, and reservations.

pub mod property;
pub mod reservation;
pub mod user;

pub use property::{NewProperty, Property, PropertyWithRating};
pub use reservation::{GuestReservation, Reservation};
pub use user::{NewUser, User};
