//! Property repository
//!
//! Filtered listing search and listing creation. The search statement is
//! assembled by [`SearchQuery`]; this repo only binds and executes it.

use sqlx::{FromRow, PgPool, Row};

use crate::db::error::DbError;
use crate::db::search::{PropertySearch, SearchParam, SearchQuery};
use crate::models::{NewProperty, Property, PropertyWithRating};

pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search listings with whichever filters the caller supplied,
    /// ordered by nightly price ascending. Listings without reviews are
    /// included with a `None` rating.
    pub async fn search(
        &self,
        options: &PropertySearch,
        limit: Option<i64>,
    ) -> Result<Vec<PropertyWithRating>, DbError> {
        let query = SearchQuery::build(options, limit);
        tracing::debug!(sql = query.sql(), "assembled property search");

        let mut statement = sqlx::query(query.sql());
        for param in query.params() {
            statement = match param {
                SearchParam::Text(value) => statement.bind(value.as_str()),
                SearchParam::Int(value) => statement.bind(*value),
            };
        }

        let rows = statement.fetch_all(self.pool).await.map_err(|err| {
            tracing::error!("property search failed: {err}");
            DbError::from(err)
        })?;

        rows.iter()
            .map(|row| {
                Ok(PropertyWithRating {
                    property: Property::from_row(row)?,
                    average_rating: row.try_get("average_rating")?,
                })
            })
            .collect()
    }

    /// Insert a listing and return the stored record with its assigned id.
    pub async fn create(&self, new_property: &NewProperty) -> Result<Property, DbError> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description,
                thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces,
                number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(new_property.owner_id)
        .bind(&new_property.title)
        .bind(&new_property.description)
        .bind(&new_property.thumbnail_photo_url)
        .bind(&new_property.cover_photo_url)
        .bind(new_property.cost_per_night)
        .bind(new_property.parking_spaces)
        .bind(new_property.number_of_bathrooms)
        .bind(new_property.number_of_bedrooms)
        .bind(&new_property.country)
        .bind(&new_property.street)
        .bind(&new_property.city)
        .bind(&new_property.province)
        .bind(&new_property.post_code)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            tracing::error!("property insert failed: {err}");
            DbError::from(err)
        })?;

        Ok(property)
    }
}
