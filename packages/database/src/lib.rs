#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Member-store access: connection, lookups, and schema migrations.
//!
//! The member table is the flat record store the rollup engine groups
//! over. Its schema ships as embedded SQL migrations applied at server
//! startup; lookups use raw SQL via `query_raw_params()`.

pub mod db;
pub mod queries;

use include_dir::{Dir, include_dir};
use switchy_database::Database;
use switchy_schema::discovery::embedded::EmbeddedMigrationSource;
use switchy_schema::runner::MigrationRunner;

/// Embedded SQL migrations: the `members` table and the indexes the
/// grouped rollup queries depend on.
static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../migrations");

/// Errors that can occur while reading the member store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A member-store query failed.
    #[error("Member store error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Applying the member-store schema failed.
    #[error("Schema migration error: {0}")]
    Migration(#[from] switchy_schema::MigrationError),
}

/// Brings the member-store schema up to date.
///
/// Safe to run on every startup: already-applied migrations are
/// skipped.
///
/// # Errors
///
/// Returns [`DbError`] if any migration fails to apply.
pub async fn run_migrations(db: &dyn Database) -> Result<(), DbError> {
    let source = EmbeddedMigrationSource::new(&MIGRATIONS_DIR);
    MigrationRunner::new(Box::new(source)).run(db).await?;
    log::info!("Member store schema is up to date");
    Ok(())
}
