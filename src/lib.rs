//! stayfinder-db: data-access layer for the Stayfinder rental booking app
//!
//! Issues parameterized PostgreSQL queries for users, reservations, and
//! property listings. Property search composes its WHERE/HAVING clauses
//! dynamically from whichever optional filters the caller supplies; see
//! [`db::search`].

pub mod config;
pub mod db;
pub mod models;

pub use config::DbConfig;
pub use db::{
    create_pool, DbError, PropertyRepo, PropertySearch, ReservationRepo, SearchQuery, UserRepo,
};
