#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Registered-voter reference totals.
//!
//! INEC publishes registered-voter counts at state granularity only, so
//! this registry is the external ground truth the rollup engine measures
//! engagement against. Totals at any deeper level are proportional
//! estimates derived from these figures, never ground truth.
//!
//! The registry is an explicitly constructed instance shared read-only
//! across requests — there is no module-level table, so tests can
//! substitute fixture data via [`ReferenceRegistry::from_entries`].

use std::collections::BTreeMap;

/// Registered-voter totals from the 2023 INEC voter register, per state.
///
/// Source: INEC national register of voters, final figures published
/// ahead of the 2023 general election.
const NIGERIA_2023: &[(&str, u64)] = &[
    ("Abia", 2_120_808),
    ("Adamawa", 2_196_566),
    ("Akwa Ibom", 2_357_418),
    ("Anambra", 2_656_437),
    ("Bauchi", 2_749_268),
    ("Bayelsa", 1_056_862),
    ("Benue", 2_777_727),
    ("Borno", 2_513_281),
    ("Cross River", 1_766_466),
    ("Delta", 3_221_697),
    ("Ebonyi", 1_597_646),
    ("Edo", 2_501_081),
    ("Ekiti", 987_647),
    ("Enugu", 2_112_793),
    ("Federal Capital Territory", 1_570_307),
    ("Gombe", 1_575_794),
    ("Imo", 2_419_922),
    ("Jigawa", 2_351_298),
    ("Kaduna", 4_335_208),
    ("Kano", 5_921_370),
    ("Katsina", 3_516_719),
    ("Kebbi", 2_032_041),
    ("Kogi", 1_932_654),
    ("Kwara", 1_695_927),
    ("Lagos", 7_060_195),
    ("Nasarawa", 1_899_244),
    ("Niger", 2_698_344),
    ("Ogun", 2_688_305),
    ("Ondo", 1_991_344),
    ("Osun", 1_954_800),
    ("Oyo", 3_276_675),
    ("Plateau", 2_789_528),
    ("Rivers", 3_537_190),
    ("Sokoto", 2_172_056),
    ("Taraba", 2_022_374),
    ("Yobe", 1_485_146),
    ("Zamfara", 1_926_870),
];

/// Read-only registry of registered-voter totals keyed by state name.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    totals: BTreeMap<String, u64>,
}

impl ReferenceRegistry {
    /// Builds the registry shipped with the system: the 2023 INEC
    /// register for all 36 states and the FCT.
    #[must_use]
    pub fn nigeria() -> Self {
        Self::from_entries(NIGERIA_2023.iter().map(|&(name, total)| (name, total)))
    }

    /// Builds a registry from arbitrary entries. Intended for tests and
    /// for loading alternative register snapshots.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        Self {
            totals: entries
                .into_iter()
                .map(|(name, total)| (name.trim().to_string(), total))
                .collect(),
        }
    }

    /// Registered-voter total for a state.
    ///
    /// Lookup trims whitespace and ignores ASCII case. Unknown state
    /// names return `0` — missing reference data degrades into zeroed
    /// metrics downstream rather than an error.
    #[must_use]
    pub fn total_for(&self, state: &str) -> u64 {
        let wanted = state.trim();
        if let Some(&total) = self.totals.get(wanted) {
            return total;
        }
        self.totals
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map_or(0, |(_, &total)| total)
    }

    /// Whether a state is present in the register.
    #[must_use]
    pub fn contains(&self, state: &str) -> bool {
        let wanted = state.trim();
        self.totals
            .keys()
            .any(|name| name.eq_ignore_ascii_case(wanted))
    }

    /// Sum of every state's registered-voter total.
    #[must_use]
    pub fn national_total(&self) -> u64 {
        self.totals.values().sum()
    }

    /// State names in the register, in name order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }

    /// Number of states in the register.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether the register is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_all_states_and_fct() {
        assert_eq!(ReferenceRegistry::nigeria().len(), 37);
    }

    #[test]
    fn looks_up_known_state() {
        let registry = ReferenceRegistry::nigeria();
        assert_eq!(registry.total_for("Lagos"), 7_060_195);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let registry = ReferenceRegistry::nigeria();
        assert_eq!(registry.total_for("  kano "), 5_921_370);
    }

    #[test]
    fn unknown_state_is_zero() {
        let registry = ReferenceRegistry::nigeria();
        assert_eq!(registry.total_for("Atlantis"), 0);
    }

    #[test]
    fn national_total_sums_states() {
        let registry = ReferenceRegistry::from_entries([("Lagos", 100), ("Kano", 50)]);
        assert_eq!(registry.national_total(), 150);
    }

    #[test]
    fn states_iterate_in_name_order() {
        let registry = ReferenceRegistry::from_entries([("Lagos", 1), ("Abia", 2), ("Kano", 3)]);
        let names: Vec<&str> = registry.states().collect();
        assert_eq!(names, vec!["Abia", "Kano", "Lagos"]);
    }

    #[test]
    fn fixture_entries_are_trimmed() {
        let registry = ReferenceRegistry::from_entries([(" Lagos ", 10)]);
        assert!(registry.contains("lagos"));
        assert_eq!(registry.total_for("Lagos"), 10);
    }
}
