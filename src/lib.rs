//! Servicedesk: an HTTP/JSON backend for college service-support tickets.
//!
//! Users register and log in; staff create support tickets and move them
//! through `Pending`, `In Progress` and `Completed`. All state lives in a
//! single SQLite file. Each request opens its own connection and closes it
//! before the response is sent.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`observability`]: Metrics and tracing setup
//! - [`password`]: Argon2 password hashing
//! - [`server`]: Router construction and HTTP lifecycle
//! - [`service`]: Route handlers and the API error type
//! - [`storage`]: SQLite connection provider and queries
//! - [`ticket`]: Ticket status values

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // service::error::ApiError is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::missing_panics_doc,         // Panic docs can be verbose
    clippy::needless_raw_string_hashes  // r#""# is fine for SQL
)]

pub mod config;
pub mod observability;
pub mod password;
pub mod server;
pub mod service;
pub mod storage;
pub mod ticket;

/// Role name restricted to a single holder.
pub const ADMIN_ROLE: &str = "admin";
