//! Database layer - connection pool, search query construction, repositories
//!
//! # Design Principles
//!
//! - One connection pool shared by every repository - no per-call connections
//! - Every bound value is a positional `$n` parameter - no literal interpolation
//! - Row absence is `Ok(None)` / an empty `Vec`, never an error
//! - One statement per operation; no multi-statement transactions

pub mod error;
pub mod pool;
pub mod repos;
pub mod search;

pub use error::DbError;
pub use pool::create_pool;
pub use repos::{PropertyRepo, ReservationRepo, UserRepo};
pub use search::{PropertySearch, SearchParam, SearchQuery, DEFAULT_LIMIT};
