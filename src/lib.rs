//! sidequest - weekly quest suggestions scheduled around an availability grid.
//!
//! The library crates carry the domain:
//! - `sidequest-shared`: week ids, the 7x16 grid, quest types
//! - `sidequest-quest`: the catalog, preference scoring, weekly generation
//! - `sidequest-schedule`: the two-tier schedule and reconciliation rules
//! - `sidequest-user`: the persisted user document and store trait
//!
//! This crate is the HTTP surface, configuration and SQLite persistence.

pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::AppError;
