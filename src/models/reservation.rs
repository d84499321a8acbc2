//! Reservation records.
//!
//! Reservations are read-only from this layer's perspective; they link a
//! user (as guest) to a property over a date range.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::Property;

/// A reservation, as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reservation {
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i32,
    pub guest_id: i32,
}

/// A guest's reservation joined with the reserved property and its
/// average review rating - the row shape of the trips listing.
#[derive(Debug, Clone, Serialize)]
pub struct GuestReservation {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub property: Property,
    pub average_rating: Option<f64>,
}
