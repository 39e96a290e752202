//! # TeamTrack Shared Library
//!
//! Shared types and business logic for the TeamTrack API server.
//!
//! ## Module Organization
//!
//! - `models`: Entity definitions and their constraint tables
//! - `validation`: The declarative constraint interpreter
//! - `repo`: Per-entity repositories over a PostgreSQL pool
//! - `db`: Connection pool and migrations

pub mod db;
pub mod models;
pub mod repo;
pub mod validation;

/// Current version of the TeamTrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
