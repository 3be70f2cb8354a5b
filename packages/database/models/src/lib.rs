#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Database row types for the member record store.
//!
//! Members carry flat location fields (state, LGA, ward, polling unit).
//! The rollup engine groups over these columns per request; nothing
//! hierarchical is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member row as stored in the `members` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    /// Primary key.
    pub id: i64,
    /// Full display name.
    pub full_name: String,
    /// Email address, if provided.
    pub email: Option<String>,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Designation string, e.g. `"Ward Coordinator"` or `"Member"`.
    pub designation: String,
    /// Whether the member holds platform admin rights.
    pub is_admin: bool,
    /// Assigned or registered state.
    pub state: Option<String>,
    /// Assigned or registered LGA.
    pub lga: Option<String>,
    /// Assigned or registered ward.
    pub ward: Option<String>,
    /// Assigned or registered polling unit.
    pub polling_unit: Option<String>,
    /// Whether the member holds a Permanent Voter's Card.
    pub has_pvc: bool,
    /// Account creation time.
    pub created_at: Option<DateTime<Utc>>,
}
