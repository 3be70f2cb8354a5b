//! Viewer scope resolution.
//!
//! Maps a caller's designation and assigned location onto the subtree
//! they are authorized to see. This is the single authorization gate for
//! the rollup subsystem — the assembler never re-derives scope. The
//! function is pure and total over its inputs and performs no I/O.

use std::str::FromStr as _;

use voter_reach_engagement_models::{MemberIdentity, ViewerScope};
use voter_reach_location_models::{Designation, LocationLevel, LocationPath};

use crate::EngagementError;

fn missing(identity: &MemberIdentity, field: &'static str) -> EngagementError {
    EngagementError::MissingAssignment {
        designation: identity.designation.clone(),
        field,
    }
}

/// Resolves a caller's identity to a viewer scope.
///
/// Tiers, broadest to narrowest: a National Coordinator (or an admin
/// whose designation matches no tier) sees every state; State, LGA, and
/// Ward Coordinators see the subtree of their assignment, one level
/// down. Leaf roles and unknown designations without admin rights get no
/// view.
///
/// # Errors
///
/// Returns [`EngagementError::MissingAssignment`] when the designation
/// requires an assignment field that is unset, and
/// [`EngagementError::Forbidden`] when the designation grants no view.
pub fn resolve(identity: &MemberIdentity) -> Result<ViewerScope, EngagementError> {
    let designation = Designation::from_str(identity.designation.trim()).ok();

    match designation {
        Some(Designation::NationalCoordinator) => Ok(ViewerScope {
            root: LocationPath::national(),
            child_level: LocationLevel::State,
        }),
        Some(Designation::StateCoordinator) => {
            let state = identity.state.as_deref().ok_or_else(|| missing(identity, "state"))?;
            Ok(ViewerScope {
                root: LocationPath::state(state),
                child_level: LocationLevel::Lga,
            })
        }
        Some(Designation::LgaCoordinator) => {
            let state = identity.state.as_deref().ok_or_else(|| missing(identity, "state"))?;
            let lga = identity.lga.as_deref().ok_or_else(|| missing(identity, "lga"))?;
            Ok(ViewerScope {
                root: LocationPath::lga(state, lga),
                child_level: LocationLevel::Ward,
            })
        }
        Some(Designation::WardCoordinator) => {
            let state = identity.state.as_deref().ok_or_else(|| missing(identity, "state"))?;
            let lga = identity.lga.as_deref().ok_or_else(|| missing(identity, "lga"))?;
            let ward = identity.ward.as_deref().ok_or_else(|| missing(identity, "ward"))?;
            Ok(ViewerScope {
                root: LocationPath::ward(state, lga, ward),
                child_level: LocationLevel::PollingUnit,
            })
        }
        // Leaf roles and unrecognized designations: admins fall back to
        // the national view, everyone else has no dashboard.
        Some(Designation::PollingUnitAgent | Designation::Member) | None => {
            if identity.is_admin {
                Ok(ViewerScope {
                    root: LocationPath::national(),
                    child_level: LocationLevel::State,
                })
            } else {
                Err(EngagementError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(designation: &str) -> MemberIdentity {
        MemberIdentity {
            designation: designation.to_string(),
            state: Some("Lagos".to_string()),
            lga: Some("Ikeja".to_string()),
            ward: Some("Ward 3".to_string()),
            is_admin: false,
        }
    }

    #[test]
    fn national_coordinator_sees_states() {
        let scope = resolve(&identity("National Coordinator")).unwrap();
        assert_eq!(scope.root, LocationPath::national());
        assert_eq!(scope.child_level, LocationLevel::State);
    }

    #[test]
    fn state_coordinator_sees_lgas_of_their_state() {
        let scope = resolve(&identity("State Coordinator")).unwrap();
        assert_eq!(scope.root, LocationPath::state("Lagos"));
        assert_eq!(scope.child_level, LocationLevel::Lga);
    }

    #[test]
    fn lga_coordinator_sees_wards_of_their_lga() {
        let scope = resolve(&identity("LGA Coordinator")).unwrap();
        assert_eq!(scope.root, LocationPath::lga("Lagos", "Ikeja"));
        assert_eq!(scope.child_level, LocationLevel::Ward);
    }

    #[test]
    fn ward_coordinator_sees_polling_units_of_their_ward() {
        let scope = resolve(&identity("Ward Coordinator")).unwrap();
        assert_eq!(scope.root, LocationPath::ward("Lagos", "Ikeja", "Ward 3"));
        assert_eq!(scope.child_level, LocationLevel::PollingUnit);
    }

    #[test]
    fn lga_coordinator_without_lga_is_missing_assignment() {
        let mut caller = identity("LGA Coordinator");
        caller.lga = None;
        let err = resolve(&caller).unwrap_err();
        assert!(matches!(
            err,
            EngagementError::MissingAssignment { field: "lga", .. }
        ));
    }

    #[test]
    fn state_coordinator_without_state_is_missing_assignment() {
        let mut caller = identity("State Coordinator");
        caller.state = None;
        let err = resolve(&caller).unwrap_err();
        assert!(matches!(
            err,
            EngagementError::MissingAssignment { field: "state", .. }
        ));
    }

    #[test]
    fn guest_is_forbidden() {
        let err = resolve(&identity("Guest")).unwrap_err();
        assert!(matches!(err, EngagementError::Forbidden));
    }

    #[test]
    fn polling_unit_agent_is_forbidden() {
        let err = resolve(&identity("Polling Unit Agent")).unwrap_err();
        assert!(matches!(err, EngagementError::Forbidden));
    }

    #[test]
    fn admin_without_tier_gets_national_view() {
        let mut caller = identity("Guest");
        caller.is_admin = true;
        let scope = resolve(&caller).unwrap();
        assert_eq!(scope.root, LocationPath::national());
        assert_eq!(scope.child_level, LocationLevel::State);
    }

    #[test]
    fn designation_parse_trims_and_ignores_case() {
        let scope = resolve(&identity(" ward coordinator ")).unwrap();
        assert_eq!(scope.child_level, LocationLevel::PollingUnit);
    }
}
