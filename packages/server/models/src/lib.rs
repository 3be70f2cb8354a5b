#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the voter reach server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the engine's view types to allow independent evolution of the API
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voter_reach_database_models::MemberRow;
use voter_reach_engagement_models::{DashboardView, MemberIdentity, NodeStats, StateTreeNode};
use voter_reach_location_models::{LocationLevel, slugify};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Stats for one location node as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNodeStats {
    /// Slugified node name.
    pub id: String,
    /// Display name of the node.
    pub name: String,
    /// The node's hierarchy level. Absent for the national roll-up.
    pub level: Option<LocationLevel>,
    /// State this node belongs to.
    pub state: Option<String>,
    /// LGA this node belongs to, where applicable.
    pub lga: Option<String>,
    /// Ward this node belongs to, where applicable.
    pub ward: Option<String>,
    /// Polling unit name, for polling-unit nodes.
    pub polling_unit: Option<String>,
    /// Total members attributed to this node.
    pub total_members: u64,
    /// Members holding a PVC.
    pub with_pvc: u64,
    /// Members without a PVC.
    pub without_pvc: u64,
    /// Members reachable by phone.
    pub with_phone: u64,
    /// Members reachable by email.
    pub with_email: u64,
    /// Registered voters (actual at state level, estimated below).
    pub registered_voters: u64,
    /// Registered voters not yet on the platform.
    pub unconverted: u64,
    /// Members as a percentage of registered voters.
    pub conversion_rate: f64,
    /// PVC holders as a percentage of members.
    pub pvc_rate: f64,
    /// Whether `registeredVoters` is an estimate.
    pub is_estimated: bool,
}

impl From<NodeStats> for ApiNodeStats {
    fn from(node: NodeStats) -> Self {
        Self {
            id: slugify(&node.name),
            state: node.path.state,
            lga: node.path.lga,
            ward: node.path.ward,
            polling_unit: node.path.polling_unit,
            level: node.level,
            total_members: node.observed.total_members,
            with_pvc: node.observed.with_pvc,
            without_pvc: node.observed.without_pvc,
            with_phone: node.observed.with_phone,
            with_email: node.observed.with_email,
            registered_voters: node.metrics.registered_voters,
            unconverted: node.metrics.unconverted,
            conversion_rate: node.metrics.conversion_rate,
            pvc_rate: node.metrics.pvc_rate,
            is_estimated: node.metrics.is_estimated,
            name: node.name,
        }
    }
}

/// The caller's assigned location, echoed back on dashboard responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAssignedLocation {
    /// Assigned state.
    pub state: Option<String>,
    /// Assigned LGA.
    pub lga: Option<String>,
    /// Assigned ward.
    pub ward: Option<String>,
}

impl From<&MemberIdentity> for ApiAssignedLocation {
    fn from(identity: &MemberIdentity) -> Self {
        Self {
            state: identity.state.clone(),
            lga: identity.lga.clone(),
            ward: identity.ward.clone(),
        }
    }
}

/// The assembled dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboardData {
    /// Roll-up stats for the viewer's scope root.
    pub root_stats: ApiNodeStats,
    /// Stats for each node one level below the scope root.
    pub children: Vec<ApiNodeStats>,
    /// Observed-aggregate drill-down tree for the viewer's subtree.
    pub hierarchical_data: Vec<StateTreeNode>,
}

/// Response from the dashboard data endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboardResponse {
    /// Always `true` on success responses.
    pub success: bool,
    /// The caller's designation string.
    pub user_designation: String,
    /// The caller's assigned location.
    pub assigned_location: ApiAssignedLocation,
    /// The assembled dashboard.
    pub dashboard_data: ApiDashboardData,
}

impl ApiDashboardResponse {
    /// Builds the response envelope from an assembled view.
    #[must_use]
    pub fn from_view(identity: &MemberIdentity, view: DashboardView) -> Self {
        Self {
            success: true,
            user_designation: identity.designation.clone(),
            assigned_location: ApiAssignedLocation::from(identity),
            dashboard_data: ApiDashboardData {
                root_stats: ApiNodeStats::from(view.root),
                children: view.children.into_iter().map(ApiNodeStats::from).collect(),
                hierarchical_data: view.hierarchy,
            },
        }
    }
}

/// One subordinate account in the subordinates listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubordinate {
    /// Member ID.
    pub id: i64,
    /// Full display name.
    pub full_name: String,
    /// Email address, if provided.
    pub email: Option<String>,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Designation string.
    pub designation: String,
    /// Assigned state.
    pub state: Option<String>,
    /// Assigned LGA.
    pub lga: Option<String>,
    /// Assigned ward.
    pub ward: Option<String>,
    /// Assigned polling unit.
    pub polling_unit: Option<String>,
    /// Whether the member holds a PVC.
    pub has_pvc: bool,
    /// Account creation time.
    pub created_at: Option<DateTime<Utc>>,
}

impl From<MemberRow> for ApiSubordinate {
    fn from(row: MemberRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            designation: row.designation,
            state: row.state,
            lga: row.lga,
            ward: row.ward,
            polling_unit: row.polling_unit,
            has_pvc: row.has_pvc,
            created_at: row.created_at,
        }
    }
}

/// Response from the subordinates endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubordinatesResponse {
    /// Always `true` on success responses.
    pub success: bool,
    /// Accounts one tier below the caller, within their subtree.
    pub subordinates: Vec<ApiSubordinate>,
}
