#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Types produced and consumed by the voter engagement rollup engine.
//!
//! Observed aggregates are counted directly from member records per
//! request and never persisted. Estimated metrics are a pure function of
//! an observed aggregate plus the state ancestor's observed total and
//! registered-voter reference total.

use serde::{Deserialize, Serialize};
use voter_reach_database_models::MemberRow;
use voter_reach_location_models::{LocationLevel, LocationPath};

/// Counts observed directly from member records for one location node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedAggregate {
    /// Total members attributed to this node.
    pub total_members: u64,
    /// Members holding a Permanent Voter's Card.
    pub with_pvc: u64,
    /// Members without a PVC. Always `total_members - with_pvc`.
    pub without_pvc: u64,
    /// Members reachable by phone.
    pub with_phone: u64,
    /// Members reachable by email.
    pub with_email: u64,
}

impl ObservedAggregate {
    /// Adds another aggregate's counts into this one.
    pub fn merge(&mut self, other: &Self) {
        self.total_members += other.total_members;
        self.with_pvc += other.with_pvc;
        self.without_pvc += other.without_pvc;
        self.with_phone += other.with_phone;
        self.with_email += other.with_email;
    }
}

/// Indicators derived from observed counts and the reference register.
///
/// `registered_voters` is the actual register figure at state level and a
/// proportional estimate below it — consumers must treat estimated
/// figures as approximations biased toward areas with more platform
/// activity, not ground truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedMetrics {
    /// Registered voters for this node (actual or estimated).
    pub registered_voters: u64,
    /// Registered voters not yet on the platform. Floored at zero.
    pub unconverted: u64,
    /// Members as a percentage of registered voters. Not clamped — a
    /// value above 100 signals an under-estimated reference total.
    pub conversion_rate: f64,
    /// PVC holders as a percentage of members.
    pub pvc_rate: f64,
    /// Whether `registered_voters` is an estimate rather than a register
    /// figure.
    pub is_estimated: bool,
}

/// The caller's identity as resolved by the auth layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberIdentity {
    /// Raw designation string from the member record.
    pub designation: String,
    /// Assigned state, for state-level roles and below.
    pub state: Option<String>,
    /// Assigned LGA, for LGA-level roles and below.
    pub lga: Option<String>,
    /// Assigned ward, for ward-level roles and below.
    pub ward: Option<String>,
    /// Whether the caller holds platform admin rights.
    pub is_admin: bool,
}

impl From<&MemberRow> for MemberIdentity {
    fn from(row: &MemberRow) -> Self {
        Self {
            designation: row.designation.clone(),
            state: row.state.clone(),
            lga: row.lga.clone(),
            ward: row.ward.clone(),
            is_admin: row.is_admin,
        }
    }
}

/// The subtree a viewer is authorized to see.
///
/// Derived from [`MemberIdentity`] per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerScope {
    /// Root of the visible subtree. The national root for national and
    /// admin viewers.
    pub root: LocationPath,
    /// The level enumerated as `children` in the dashboard — one level
    /// below `root`.
    pub child_level: LocationLevel,
}

/// Observed counts plus derived indicators for one location node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStats {
    /// Display name of the node.
    pub name: String,
    /// Full path identifying the node.
    pub path: LocationPath,
    /// The node's level. `None` for the national root.
    pub level: Option<LocationLevel>,
    /// Counts observed from member records.
    pub observed: ObservedAggregate,
    /// Derived indicators.
    pub metrics: EstimatedMetrics,
}

/// One polling unit in the hierarchical drill-down tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingUnitTreeNode {
    /// Polling unit name.
    pub name: String,
    /// Observed counts for this polling unit.
    pub aggregate: ObservedAggregate,
}

/// One ward and its polling units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardTreeNode {
    /// Ward name.
    pub name: String,
    /// Observed counts for this ward.
    pub aggregate: ObservedAggregate,
    /// Polling units under this ward, name-ordered.
    pub polling_units: Vec<PollingUnitTreeNode>,
}

/// One LGA and its wards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LgaTreeNode {
    /// LGA name.
    pub name: String,
    /// Observed counts for this LGA.
    pub aggregate: ObservedAggregate,
    /// Wards under this LGA, name-ordered.
    pub wards: Vec<WardTreeNode>,
}

/// One state and its LGAs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTreeNode {
    /// State name.
    pub name: String,
    /// Observed counts for this state.
    pub aggregate: ObservedAggregate,
    /// LGAs under this state, name-ordered.
    pub lgas: Vec<LgaTreeNode>,
}

/// The assembled, role-scoped dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// The viewer's resolved scope.
    pub scope: ViewerScope,
    /// Roll-up stats for the scope root itself.
    pub root: NodeStats,
    /// Stats for each node one level below the root.
    pub children: Vec<NodeStats>,
    /// Observed-aggregate drill-down tree confined to the scope root's
    /// subtree.
    pub hierarchy: Vec<StateTreeNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_all_counts() {
        let mut a = ObservedAggregate {
            total_members: 10,
            with_pvc: 6,
            without_pvc: 4,
            with_phone: 9,
            with_email: 3,
        };
        let b = ObservedAggregate {
            total_members: 5,
            with_pvc: 1,
            without_pvc: 4,
            with_phone: 2,
            with_email: 5,
        };
        a.merge(&b);
        assert_eq!(a.total_members, 15);
        assert_eq!(a.with_pvc, 7);
        assert_eq!(a.without_pvc, 8);
        assert_eq!(a.with_phone, 11);
        assert_eq!(a.with_email, 8);
    }

    #[test]
    fn identity_from_member_row() {
        let row = MemberRow {
            id: 7,
            full_name: "Amina Yusuf".to_string(),
            email: None,
            phone: Some("+2348012345678".to_string()),
            designation: "Ward Coordinator".to_string(),
            is_admin: false,
            state: Some("Lagos".to_string()),
            lga: Some("Ikeja".to_string()),
            ward: Some("Ward 3".to_string()),
            polling_unit: None,
            has_pvc: true,
            created_at: None,
        };
        let identity = MemberIdentity::from(&row);
        assert_eq!(identity.designation, "Ward Coordinator");
        assert_eq!(identity.state.as_deref(), Some("Lagos"));
        assert!(!identity.is_admin);
    }
}
