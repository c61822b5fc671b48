//! SQLite storage layer for servicedesk.
//!
//! Provides:
//! - Per-request connection provider with scoped release
//! - Schema bootstrap for the `users` and `tickets` tables
//! - Name-addressable row conversion to JSON
//! - User and ticket queries

pub mod connection;
pub mod row;
pub mod schema;
pub mod tickets;
pub mod users;

pub use connection::{Store, StoreError};
