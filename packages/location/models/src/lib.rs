#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location hierarchy types for the voter engagement rollup.
//!
//! This crate defines the canonical State → LGA → Ward → Polling Unit
//! nesting used across the entire voter-reach system, along with the
//! coordinator designation taxonomy. A node's identity is its full path
//! from the root — location names are only unique within their parent.

mod designation;

pub use designation::Designation;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One level of the location hierarchy, ordered broadest to narrowest.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LocationLevel {
    /// A state (or the Federal Capital Territory).
    State,
    /// A local government area within a state.
    Lga,
    /// An electoral ward within an LGA.
    Ward,
    /// A polling unit within a ward.
    PollingUnit,
}

impl LocationLevel {
    /// Returns the level one step below this one, or `None` for the
    /// narrowest level.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::State => Some(Self::Lga),
            Self::Lga => Some(Self::Ward),
            Self::Ward => Some(Self::PollingUnit),
            Self::PollingUnit => None,
        }
    }

    /// Human-readable label for this level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::Lga => "LGA",
            Self::Ward => "Ward",
            Self::PollingUnit => "Polling Unit",
        }
    }

    /// Returns all levels, broadest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::State, Self::Lga, Self::Ward, Self::PollingUnit]
    }
}

/// A path into the location hierarchy.
///
/// The empty path is the national root. Deeper fields are only set when
/// every shallower field is — a ward without its state and LGA is not a
/// valid location.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct LocationPath {
    /// State name.
    pub state: Option<String>,
    /// LGA name.
    pub lga: Option<String>,
    /// Ward name.
    pub ward: Option<String>,
    /// Polling unit name.
    pub polling_unit: Option<String>,
}

impl LocationPath {
    /// The national root path.
    #[must_use]
    pub const fn national() -> Self {
        Self {
            state: None,
            lga: None,
            ward: None,
            polling_unit: None,
        }
    }

    /// Path to a state node.
    #[must_use]
    pub fn state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Self::national()
        }
    }

    /// Path to an LGA node.
    #[must_use]
    pub fn lga(state: impl Into<String>, lga: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            lga: Some(lga.into()),
            ..Self::national()
        }
    }

    /// Path to a ward node.
    #[must_use]
    pub fn ward(
        state: impl Into<String>,
        lga: impl Into<String>,
        ward: impl Into<String>,
    ) -> Self {
        Self {
            state: Some(state.into()),
            lga: Some(lga.into()),
            ward: Some(ward.into()),
            polling_unit: None,
        }
    }

    /// Path to a polling unit node.
    #[must_use]
    pub fn polling_unit(
        state: impl Into<String>,
        lga: impl Into<String>,
        ward: impl Into<String>,
        polling_unit: impl Into<String>,
    ) -> Self {
        Self {
            state: Some(state.into()),
            lga: Some(lga.into()),
            ward: Some(ward.into()),
            polling_unit: Some(polling_unit.into()),
        }
    }

    /// The level of the node this path identifies, or `None` for the
    /// national root.
    #[must_use]
    pub fn level(&self) -> Option<LocationLevel> {
        if self.polling_unit.is_some() {
            Some(LocationLevel::PollingUnit)
        } else if self.ward.is_some() {
            Some(LocationLevel::Ward)
        } else if self.lga.is_some() {
            Some(LocationLevel::Lga)
        } else if self.state.is_some() {
            Some(LocationLevel::State)
        } else {
            None
        }
    }

    /// The name component at the given level, if set.
    #[must_use]
    pub fn get(&self, level: LocationLevel) -> Option<&str> {
        match level {
            LocationLevel::State => self.state.as_deref(),
            LocationLevel::Lga => self.lga.as_deref(),
            LocationLevel::Ward => self.ward.as_deref(),
            LocationLevel::PollingUnit => self.polling_unit.as_deref(),
        }
    }

    /// The leaf name of this path, or `None` for the national root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.level().and_then(|level| self.get(level))
    }

    /// Extends this path by one level with the given child name.
    ///
    /// Returns the path unchanged if it already ends at a polling unit.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        let next = self
            .level()
            .map_or(Some(LocationLevel::State), LocationLevel::child);
        match next {
            Some(LocationLevel::State) => path.state = Some(name.into()),
            Some(LocationLevel::Lga) => path.lga = Some(name.into()),
            Some(LocationLevel::Ward) => path.ward = Some(name.into()),
            Some(LocationLevel::PollingUnit) => path.polling_unit = Some(name.into()),
            None => {}
        }
        path
    }

    /// Ordered name components, broadest first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        LocationLevel::all()
            .iter()
            .filter_map(|&level| self.get(level))
            .collect()
    }

    /// Human-readable label, e.g. `"Lagos / Ikeja / Ward 3"`.
    ///
    /// The national root is labelled `"Nigeria"`.
    #[must_use]
    pub fn label(&self) -> String {
        let names = self.names();
        if names.is_empty() {
            "Nigeria".to_string()
        } else {
            names.join(" / ")
        }
    }

    /// URL-safe identifier derived from the full path.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.names().join(" "))
    }

    /// Whether this path lies within `ancestor`'s subtree.
    ///
    /// Every component set on `ancestor` must match. Every path is
    /// within the national root.
    #[must_use]
    pub fn is_within(&self, ancestor: &Self) -> bool {
        LocationLevel::all().iter().all(|&level| {
            ancestor
                .get(level)
                .is_none_or(|name| self.get(level) == Some(name))
        })
    }
}

/// Converts a display name into a URL-safe slug.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other run
/// of characters into a single `-`.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_of_ward_path() {
        let path = LocationPath::ward("Lagos", "Ikeja", "Ward 3");
        assert_eq!(path.level(), Some(LocationLevel::Ward));
    }

    #[test]
    fn national_root_has_no_level() {
        assert_eq!(LocationPath::national().level(), None);
    }

    #[test]
    fn leaf_name_is_deepest_component() {
        let path = LocationPath::polling_unit("Lagos", "Ikeja", "Ward 3", "PU 004");
        assert_eq!(path.name(), Some("PU 004"));
    }

    #[test]
    fn child_extends_one_level() {
        let path = LocationPath::state("Kano").child("Nassarawa");
        assert_eq!(path, LocationPath::lga("Kano", "Nassarawa"));
    }

    #[test]
    fn child_of_national_is_a_state() {
        let path = LocationPath::national().child("Kano");
        assert_eq!(path, LocationPath::state("Kano"));
    }

    #[test]
    fn child_of_polling_unit_is_unchanged() {
        let path = LocationPath::polling_unit("Lagos", "Ikeja", "Ward 3", "PU 004");
        assert_eq!(path.child("deeper"), path);
    }

    #[test]
    fn label_joins_components() {
        let path = LocationPath::ward("Lagos", "Ikeja", "Ward 3");
        assert_eq!(path.label(), "Lagos / Ikeja / Ward 3");
    }

    #[test]
    fn national_label() {
        assert_eq!(LocationPath::national().label(), "Nigeria");
    }

    #[test]
    fn slugifies_path() {
        let path = LocationPath::lga("Akwa Ibom", "Uyo");
        assert_eq!(path.slug(), "akwa-ibom-uyo");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Ward 3 (Central)"), "ward-3-central");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  Ikeja  "), "ikeja");
    }

    #[test]
    fn everything_is_within_the_national_root() {
        let path = LocationPath::ward("Lagos", "Ikeja", "Ward 3");
        assert!(path.is_within(&LocationPath::national()));
    }

    #[test]
    fn is_within_matches_ancestor_components() {
        let path = LocationPath::polling_unit("Lagos", "Ikeja", "Ward 3", "PU 004");
        assert!(path.is_within(&LocationPath::lga("Lagos", "Ikeja")));
        assert!(!path.is_within(&LocationPath::lga("Lagos", "Surulere")));
        assert!(!path.is_within(&LocationPath::state("Kano")));
    }

    #[test]
    fn level_child_chain() {
        assert_eq!(LocationLevel::State.child(), Some(LocationLevel::Lga));
        assert_eq!(LocationLevel::PollingUnit.child(), None);
    }

    #[test]
    fn level_serializes_camel_case() {
        assert_eq!(LocationLevel::PollingUnit.to_string(), "pollingUnit");
    }
}
