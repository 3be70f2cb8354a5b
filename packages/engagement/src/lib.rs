#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hierarchical voter-engagement rollup engine.
//!
//! Builds a four-level State → LGA → Ward → Polling Unit tree of
//! aggregated engagement metrics from flat member records, merges it
//! with the registered-voter reference register, estimates totals at
//! levels where the register has no native granularity, and exposes a
//! role-scoped view of the tree.
//!
//! Everything here is request-scoped and stateless: aggregates are
//! counted fresh from the record store on every call, the only shared
//! resource is the read-only reference registry, and independent grouped
//! queries within one request are fanned out concurrently.

pub mod aggregate;
pub mod dashboard;
pub mod estimate;
pub mod placeholder;
pub mod scope;

use thiserror::Error;

/// Errors that can occur while assembling a rollup view.
///
/// `MissingAssignment` and `Forbidden` are client errors and terminal
/// for the request; database failures are surfaced without retry —
/// retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum EngagementError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// The caller's designation requires a location assignment that is
    /// not set on their record.
    #[error("{designation} requires an assigned {field}")]
    MissingAssignment {
        /// The caller's designation.
        designation: String,
        /// The missing assignment field.
        field: &'static str,
    },

    /// The caller's designation grants no dashboard view.
    #[error("designation grants no dashboard view")]
    Forbidden,
}
