//! jobboard-server: job board API
//!
//! Jobs, companies, categories and applications over JSON/HTTP, backed by
//! PostgreSQL. Public reads, filtered job search with a total count, and an
//! authorization gate in front of listing management.
//!
//! Layers, bottom-up:
//! - `models`: records, projections, validated inputs
//! - `filter`: job search normalisation and predicate
//! - `store` / `db`: persistence boundary and its PostgreSQL implementation
//! - `auth`: identity providers, request context, gate policy
//! - `service`: the named operations (`JobBoard`)
//! - `http`: axum routes and error mapping

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod http;
pub mod models;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, IdentityConfig};
pub use error::BoardError;
pub use service::JobBoard;
pub use state::AppState;
