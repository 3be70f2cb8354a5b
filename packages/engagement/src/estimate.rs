//! Proportional-share estimation of registered-voter totals.
//!
//! The register is state-level-only, so a sub-state node's eligible
//! population is unknown. It is approximated as the same fraction of the
//! state's register total as the node's fraction of the state's
//! *observed* members. The denominator is always the state ancestor,
//! never an intermediate LGA or ward, so the ratio stays stable across
//! all depths. The estimate is biased toward areas with more platform
//! activity and is flagged `is_estimated` so consumers never mistake it
//! for ground truth.

use voter_reach_engagement_models::{EstimatedMetrics, ObservedAggregate};
use voter_reach_location_models::LocationLevel;

/// Derives indicators from an observed aggregate and a known (or
/// estimated) registered-voter total.
///
/// `unconverted` floors at zero: observed members can exceed an
/// under-estimated register total, and a negative gap is meaningless.
/// `conversion_rate` is deliberately not clamped to 100 — a value above
/// it signals exactly that under-estimation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn metrics(
    observed: &ObservedAggregate,
    registered_voters: u64,
    is_estimated: bool,
) -> EstimatedMetrics {
    let conversion_rate = if registered_voters > 0 {
        observed.total_members as f64 / registered_voters as f64 * 100.0
    } else {
        0.0
    };
    let pvc_rate = if observed.total_members > 0 {
        observed.with_pvc as f64 / observed.total_members as f64 * 100.0
    } else {
        0.0
    };

    EstimatedMetrics {
        registered_voters,
        unconverted: registered_voters.saturating_sub(observed.total_members),
        conversion_rate,
        pvc_rate,
        is_estimated,
    }
}

/// Estimates metrics for a node at `level`.
///
/// State nodes use the register figure directly. Deeper nodes receive a
/// proportional share of `state_reference`:
/// `round(state_reference * total_members / max(1, state_observed_total))`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn estimate(
    observed: &ObservedAggregate,
    level: LocationLevel,
    state_observed_total: u64,
    state_reference: u64,
) -> EstimatedMetrics {
    if level == LocationLevel::State {
        return metrics(observed, state_reference, false);
    }

    let ratio = observed.total_members as f64 / state_observed_total.max(1) as f64;
    let share = (state_reference as f64 * ratio).round() as u64;
    metrics(observed, share, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(total: u64, with_pvc: u64) -> ObservedAggregate {
        ObservedAggregate {
            total_members: total,
            with_pvc,
            without_pvc: total - with_pvc,
            with_phone: 0,
            with_email: 0,
        }
    }

    #[test]
    fn state_level_uses_register_figure() {
        let m = estimate(&observed(500, 200), LocationLevel::State, 500, 10_000);
        assert_eq!(m.registered_voters, 10_000);
        assert!(!m.is_estimated);
        assert_eq!(m.unconverted, 9_500);
        assert!((m.conversion_rate - 5.0).abs() < f64::EPSILON);
        assert!((m.pvc_rate - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sub_state_share_is_proportional() {
        // Node holds 1/4 of the state's observed members.
        let m = estimate(&observed(25, 10), LocationLevel::Lga, 100, 8_000);
        assert_eq!(m.registered_voters, 2_000);
        assert!(m.is_estimated);
        assert_eq!(m.unconverted, 1_975);
    }

    #[test]
    fn share_rounds_to_nearest() {
        let m = estimate(&observed(1, 0), LocationLevel::Ward, 3, 100);
        // 100 / 3 = 33.33..., rounds to 33.
        assert_eq!(m.registered_voters, 33);
    }

    #[test]
    fn zero_state_observed_does_not_divide_by_zero() {
        let m = estimate(&observed(0, 0), LocationLevel::Lga, 0, 8_000);
        assert_eq!(m.registered_voters, 0);
        assert_eq!(m.unconverted, 0);
        assert!((m.conversion_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unconverted_floors_at_zero() {
        let m = metrics(&observed(150, 0), 100, true);
        assert_eq!(m.unconverted, 0);
    }

    #[test]
    fn conversion_rate_is_not_clamped() {
        let m = metrics(&observed(150, 0), 100, true);
        assert!((m.conversion_rate - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_register_yields_zero_rate() {
        let m = metrics(&observed(40, 10), 0, false);
        assert_eq!(m.registered_voters, 0);
        assert!((m.conversion_rate - 0.0).abs() < f64::EPSILON);
        assert!((m.pvc_rate - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_members_yields_zero_pvc_rate() {
        let m = metrics(&ObservedAggregate::default(), 1_000, false);
        assert!((m.pvc_rate - 0.0).abs() < f64::EPSILON);
        assert_eq!(m.unconverted, 1_000);
    }
}
