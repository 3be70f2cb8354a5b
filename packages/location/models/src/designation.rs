//! Coordinator designation taxonomy.
//!
//! Designations form the organizational hierarchy that mirrors the
//! location hierarchy: a National Coordinator oversees State
//! Coordinators, who oversee LGA Coordinators, and so on down to
//! Polling Unit Agents. Plain members hold no coordinator role.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::LocationLevel;

/// A member's designation within the coordinator hierarchy.
///
/// String forms match the values stored on member records, e.g.
/// `"State Coordinator"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Designation {
    /// Oversees the whole country.
    #[serde(rename = "National Coordinator")]
    #[strum(serialize = "National Coordinator")]
    NationalCoordinator,
    /// Oversees one state.
    #[serde(rename = "State Coordinator")]
    #[strum(serialize = "State Coordinator")]
    StateCoordinator,
    /// Oversees one LGA.
    #[serde(rename = "LGA Coordinator")]
    #[strum(serialize = "LGA Coordinator")]
    LgaCoordinator,
    /// Oversees one ward.
    #[serde(rename = "Ward Coordinator")]
    #[strum(serialize = "Ward Coordinator")]
    WardCoordinator,
    /// Field agent attached to a single polling unit.
    #[serde(rename = "Polling Unit Agent")]
    #[strum(serialize = "Polling Unit Agent")]
    PollingUnitAgent,
    /// A registered member with no coordinator role.
    #[serde(rename = "Member")]
    #[strum(serialize = "Member")]
    Member,
}

impl Designation {
    /// The designation exactly one tier below this one, or `None` for
    /// leaf roles with no subordinates.
    #[must_use]
    pub const fn subordinate(self) -> Option<Self> {
        match self {
            Self::NationalCoordinator => Some(Self::StateCoordinator),
            Self::StateCoordinator => Some(Self::LgaCoordinator),
            Self::LgaCoordinator => Some(Self::WardCoordinator),
            Self::WardCoordinator => Some(Self::PollingUnitAgent),
            Self::PollingUnitAgent | Self::Member => None,
        }
    }

    /// The coordinator designation responsible for nodes at the given
    /// location level.
    #[must_use]
    pub const fn coordinator_for(level: LocationLevel) -> Self {
        match level {
            LocationLevel::State => Self::StateCoordinator,
            LocationLevel::Lga => Self::LgaCoordinator,
            LocationLevel::Ward => Self::WardCoordinator,
            LocationLevel::PollingUnit => Self::PollingUnitAgent,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn parses_exact_designation_strings() {
        assert_eq!(
            Designation::from_str("LGA Coordinator").unwrap(),
            Designation::LgaCoordinator
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            Designation::from_str("ward coordinator").unwrap(),
            Designation::WardCoordinator
        );
    }

    #[test]
    fn rejects_unknown_designations() {
        assert!(Designation::from_str("Guest").is_err());
    }

    #[test]
    fn displays_human_readable_form() {
        assert_eq!(
            Designation::PollingUnitAgent.to_string(),
            "Polling Unit Agent"
        );
    }

    #[test]
    fn subordinate_chain_descends_one_tier() {
        assert_eq!(
            Designation::NationalCoordinator.subordinate(),
            Some(Designation::StateCoordinator)
        );
        assert_eq!(
            Designation::WardCoordinator.subordinate(),
            Some(Designation::PollingUnitAgent)
        );
        assert_eq!(Designation::PollingUnitAgent.subordinate(), None);
        assert_eq!(Designation::Member.subordinate(), None);
    }

    #[test]
    fn coordinator_for_each_level() {
        assert_eq!(
            Designation::coordinator_for(LocationLevel::Lga),
            Designation::LgaCoordinator
        );
        assert_eq!(
            Designation::coordinator_for(LocationLevel::PollingUnit),
            Designation::PollingUnitAgent
        );
    }
}
