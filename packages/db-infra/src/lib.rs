//! Shared database configuration and migration infrastructure.
//! Used by the inventory service and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use config::db::{DbKind, DbSettings, StartupPolicy};
pub use error::DbInfraError;
pub use infra::db::core::{connect, orchestrate_migration, sanitize_db_url};
