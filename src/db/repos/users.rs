//! User repository
//!
//! Lookup by email or id, and registration.

use sqlx::PgPool;

use crate::db::error::DbError;
use crate::models::{NewUser, User};

pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user by email. Matching is case-insensitive so login
    /// works however the address was typed.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|err| {
            tracing::error!("user lookup by email failed: {err}");
            DbError::from(err)
        })?;

        Ok(user)
    }

    /// Look up a user by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|err| {
            tracing::error!("user lookup by id failed: {err}");
            DbError::from(err)
        })?;

        Ok(user)
    }

    /// Register a user and return the stored record with its assigned id.
    ///
    /// No duplicate-email pre-check here: the unique constraint on
    /// `users.email` rejects collisions, which surface as
    /// [`DbError::DuplicateEmail`].
    pub async fn create(&self, new_user: &NewUser) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                tracing::warn!("user insert rejected, email already registered: {err}");
                return DbError::DuplicateEmail(new_user.email.clone());
            }
            tracing::error!("user insert failed: {err}");
            DbError::from(err)
        })?;

        Ok(user)
    }
}
