//! User records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user, as stored.
///
/// `password` holds the hash produced upstream; this layer stores and
/// returns it verbatim and never inspects it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fields required to register a user. The id is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
