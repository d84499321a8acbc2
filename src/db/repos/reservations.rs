//! Reservation repository
//!
//! Read-only: lists a guest's reservations joined with the reserved
//! property and its average review rating.

use sqlx::{FromRow, PgPool, Row};

use crate::db::error::DbError;
use crate::db::search::DEFAULT_LIMIT;
use crate::models::{GuestReservation, Property, Reservation};

pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List up to `limit` reservations for a guest (default 10).
    ///
    /// Grouping is per reservation+property pair so the rating average is
    /// computed once per row. An empty result is a guest with no trips,
    /// not an error.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<GuestReservation>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.start_date,
                reservations.end_date,
                reservations.property_id,
                reservations.guest_id,
                properties.*,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
            GROUP BY reservations.id, properties.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.unwrap_or(DEFAULT_LIMIT))
        .fetch_all(self.pool)
        .await
        .map_err(|err| {
            tracing::error!("reservation listing failed: {err}");
            DbError::from(err)
        })?;

        rows.iter()
            .map(|row| {
                // The unaliased columns are the properties.* set, so the
                // property decodes straight off the row.
                let reservation = Reservation {
                    id: row.try_get("reservation_id")?,
                    start_date: row.try_get("start_date")?,
                    end_date: row.try_get("end_date")?,
                    property_id: row.try_get("property_id")?,
                    guest_id: row.try_get("guest_id")?,
                };

                Ok(GuestReservation {
                    reservation,
                    property: Property::from_row(row)?,
                    average_rating: row.try_get("average_rating")?,
                })
            })
            .collect()
    }
}
