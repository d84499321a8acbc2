//! Database error type.

use thiserror::Error;

/// Failures surfaced by the repositories.
///
/// "Row not found" is not an error for lookups - those return `Option` -
/// so callers can always tell absence from a failed query. `NotFound` is
/// for callers that want to turn absence into an error value instead.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// The store's unique constraint on `users.email` rejected an insert.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}
