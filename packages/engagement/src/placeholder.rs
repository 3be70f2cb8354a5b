//! Fallback child labels for subtrees with no observed data.
//!
//! The dashboard never renders empty: when a subtree has no attributable
//! member rows at the requested child level, the assembler substitutes a
//! small fixed set of placeholder names. The labels are invented, so the
//! policy is an explicit strategy object — swappable in tests and never
//! silently indistinguishable from real data (placeholder nodes always
//! carry `is_estimated = true` and zero observed counts).

use voter_reach_location_models::LocationLevel;

/// Strategy for naming placeholder children when a subtree has no
/// observed data.
pub trait PlaceholderPolicy: Send + Sync {
    /// Names to render at the given child level.
    fn placeholder_names(&self, level: LocationLevel) -> Vec<String>;
}

/// Default policy: three generically numbered labels per level, e.g.
/// `"Ward 1"`, `"Ward 2"`, `"Ward 3"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPlaceholders;

impl FixedPlaceholders {
    const COUNT: usize = 3;
}

impl PlaceholderPolicy for FixedPlaceholders {
    fn placeholder_names(&self, level: LocationLevel) -> Vec<String> {
        (1..=Self::COUNT)
            .map(|i| format!("{} {i}", level.label()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policy_numbers_level_labels() {
        let names = FixedPlaceholders.placeholder_names(LocationLevel::Ward);
        assert_eq!(names, vec!["Ward 1", "Ward 2", "Ward 3"]);
    }

    #[test]
    fn polling_unit_labels_are_spelled_out() {
        let names = FixedPlaceholders.placeholder_names(LocationLevel::PollingUnit);
        assert_eq!(names[0], "Polling Unit 1");
    }
}
