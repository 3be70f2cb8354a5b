//! Grouped observed-count queries over the member record store.
//!
//! One grouped query per hierarchy level: GROUP BY the level's natural
//! key plus all ancestor keys. Rows with a null or blank value anywhere
//! in the grouping path are excluded — partial location data degrades
//! granularity, it is not mis-bucketed. An empty result is a valid
//! state, not an error.

use futures::try_join;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};
use voter_reach_engagement_models::{
    LgaTreeNode, ObservedAggregate, PollingUnitTreeNode, StateTreeNode, WardTreeNode,
};
use voter_reach_location_models::{LocationLevel, LocationPath};

use crate::EngagementError;

/// Grouped counts for every node at one level, keyed by full path.
pub type LevelEntries = Vec<(LocationPath, ObservedAggregate)>;

/// The grouping columns for a level: the level's key plus all ancestors.
const fn group_columns(level: LocationLevel) -> &'static [&'static str] {
    match level {
        LocationLevel::State => &["state"],
        LocationLevel::Lga => &["state", "lga"],
        LocationLevel::Ward => &["state", "lga", "ward"],
        LocationLevel::PollingUnit => &["state", "lga", "ward", "polling_unit"],
    }
}

/// Ancestor-filter predicates applicable to a query grouped at `level`:
/// every filter component at or above the grouped level.
fn filter_predicates<'a>(
    level: LocationLevel,
    filter: &'a LocationPath,
) -> Vec<(&'static str, &'a str)> {
    [
        (LocationLevel::State, "state"),
        (LocationLevel::Lga, "lga"),
        (LocationLevel::Ward, "ward"),
        (LocationLevel::PollingUnit, "polling_unit"),
    ]
    .into_iter()
    .filter(|&(col_level, _)| col_level <= level)
    .filter_map(|(col_level, col)| filter.get(col_level).map(|value| (col, value)))
    .collect()
}

#[allow(clippy::cast_sign_loss)]
fn count_column(row: &switchy_database::Row, name: &str) -> u64 {
    let value: i64 = row.to_value(name).unwrap_or(0);
    value.max(0) as u64
}

fn aggregate_from_row(row: &switchy_database::Row) -> ObservedAggregate {
    ObservedAggregate {
        total_members: count_column(row, "total_members"),
        with_pvc: count_column(row, "with_pvc"),
        without_pvc: count_column(row, "without_pvc"),
        with_phone: count_column(row, "with_phone"),
        with_email: count_column(row, "with_email"),
    }
}

/// Runs the grouped query for one level, restricted to `filter`'s
/// subtree.
///
/// Returns one entry per node at `level`, in path order. Returns an
/// empty list when the subtree has no attributable rows.
///
/// # Errors
///
/// Returns [`EngagementError`] if the database operation fails.
pub async fn observed_at(
    db: &dyn Database,
    level: LocationLevel,
    filter: &LocationPath,
) -> Result<LevelEntries, EngagementError> {
    let cols = group_columns(level);
    let group = cols.join(", ");

    let mut frags: Vec<String> = cols
        .iter()
        .map(|col| format!("{col} IS NOT NULL AND {col} != ''"))
        .collect();
    let mut params: Vec<DatabaseValue> = Vec::new();
    for (col, value) in filter_predicates(level, filter) {
        frags.push(format!("{col} = ${}", params.len() + 1));
        params.push(DatabaseValue::String(value.to_string()));
    }

    let sql = format!(
        "SELECT {group},
                COUNT(*) AS total_members,
                COUNT(*) FILTER (WHERE has_pvc) AS with_pvc,
                COUNT(*) FILTER (WHERE NOT has_pvc) AS without_pvc,
                COUNT(*) FILTER (WHERE phone IS NOT NULL AND phone != '') AS with_phone,
                COUNT(*) FILTER (WHERE email IS NOT NULL AND email != '') AS with_email
         FROM members
         WHERE {}
         GROUP BY {group}
         ORDER BY {group}",
        frags.join(" AND ")
    );

    let rows = db.query_raw_params(&sql, &params).await?;

    Ok(rows
        .iter()
        .map(|row| {
            let mut path = LocationPath::national();
            for col in cols {
                let name: String = row.to_value(*col).unwrap_or_default();
                path = path.child(name);
            }
            (path, aggregate_from_row(row))
        })
        .collect())
}

/// Observed aggregates for all four levels of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMaps {
    /// Every state's aggregate, nationwide. Always unfiltered — the
    /// state level is the estimation basis for every deeper node.
    pub states: LevelEntries,
    /// LGA aggregates within the requested subtree.
    pub lgas: LevelEntries,
    /// Ward aggregates within the requested subtree.
    pub wards: LevelEntries,
    /// Polling unit aggregates within the requested subtree.
    pub polling_units: LevelEntries,
}

impl LevelMaps {
    /// Entries for one level.
    #[must_use]
    pub const fn at(&self, level: LocationLevel) -> &LevelEntries {
        match level {
            LocationLevel::State => &self.states,
            LocationLevel::Lga => &self.lgas,
            LocationLevel::Ward => &self.wards,
            LocationLevel::PollingUnit => &self.polling_units,
        }
    }

    /// The aggregate recorded for an exact path, if any.
    #[must_use]
    pub fn find(&self, path: &LocationPath) -> Option<&ObservedAggregate> {
        let level = path.level()?;
        self.at(level)
            .iter()
            .find(|(entry_path, _)| entry_path == path)
            .map(|(_, aggregate)| aggregate)
    }
}

/// Fetches all four level aggregations for one request.
///
/// The four grouped queries are independent reads and run concurrently;
/// any branch failing fails the whole fetch. The state query is always
/// nationwide, the deeper queries are confined to `root`'s subtree.
///
/// # Errors
///
/// Returns [`EngagementError`] if any of the queries fails.
pub async fn observed_levels(
    db: &dyn Database,
    root: &LocationPath,
) -> Result<LevelMaps, EngagementError> {
    let national = LocationPath::national();
    let (states, lgas, wards, polling_units) = try_join!(
        observed_at(db, LocationLevel::State, &national),
        observed_at(db, LocationLevel::Lga, root),
        observed_at(db, LocationLevel::Ward, root),
        observed_at(db, LocationLevel::PollingUnit, root),
    )?;

    log::debug!(
        "observed levels: {} states, {} lgas, {} wards, {} polling units",
        states.len(),
        lgas.len(),
        wards.len(),
        polling_units.len()
    );

    Ok(LevelMaps {
        states,
        lgas,
        wards,
        polling_units,
    })
}

/// Nests the four flat level maps into the typed drill-down tree,
/// confined to `root`'s subtree.
#[must_use]
pub fn nest_tree(levels: &LevelMaps, root: &LocationPath) -> Vec<StateTreeNode> {
    levels
        .states
        .iter()
        .filter(|(path, _)| root.state.is_none() || path.state == root.state)
        .map(|(state_path, aggregate)| StateTreeNode {
            name: state_path.name().unwrap_or_default().to_string(),
            aggregate: aggregate.clone(),
            lgas: nest_lgas(levels, state_path, root),
        })
        .collect()
}

fn nest_lgas(levels: &LevelMaps, state_path: &LocationPath, root: &LocationPath) -> Vec<LgaTreeNode> {
    levels
        .lgas
        .iter()
        .filter(|(path, _)| path.state == state_path.state && path.is_within(root))
        .map(|(lga_path, aggregate)| LgaTreeNode {
            name: lga_path.name().unwrap_or_default().to_string(),
            aggregate: aggregate.clone(),
            wards: nest_wards(levels, lga_path, root),
        })
        .collect()
}

fn nest_wards(levels: &LevelMaps, lga_path: &LocationPath, root: &LocationPath) -> Vec<WardTreeNode> {
    levels
        .wards
        .iter()
        .filter(|(path, _)| {
            path.state == lga_path.state && path.lga == lga_path.lga && path.is_within(root)
        })
        .map(|(ward_path, aggregate)| WardTreeNode {
            name: ward_path.name().unwrap_or_default().to_string(),
            aggregate: aggregate.clone(),
            polling_units: nest_polling_units(levels, ward_path),
        })
        .collect()
}

fn nest_polling_units(levels: &LevelMaps, ward_path: &LocationPath) -> Vec<PollingUnitTreeNode> {
    levels
        .polling_units
        .iter()
        .filter(|(path, _)| {
            path.state == ward_path.state && path.lga == ward_path.lga && path.ward == ward_path.ward
        })
        .map(|(pu_path, aggregate)| PollingUnitTreeNode {
            name: pu_path.name().unwrap_or_default().to_string(),
            aggregate: aggregate.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(total: u64) -> ObservedAggregate {
        ObservedAggregate {
            total_members: total,
            with_pvc: total / 2,
            without_pvc: total - total / 2,
            with_phone: total,
            with_email: 0,
        }
    }

    fn sample_levels() -> LevelMaps {
        LevelMaps {
            states: vec![
                (LocationPath::state("Kano"), agg(30)),
                (LocationPath::state("Lagos"), agg(50)),
            ],
            lgas: vec![
                (LocationPath::lga("Kano", "Tarauni"), agg(30)),
                (LocationPath::lga("Lagos", "Ikeja"), agg(50)),
            ],
            wards: vec![
                (LocationPath::ward("Lagos", "Ikeja", "Ward 3"), agg(50)),
            ],
            polling_units: vec![
                (
                    LocationPath::polling_unit("Lagos", "Ikeja", "Ward 3", "PU 004"),
                    agg(40),
                ),
                (
                    LocationPath::polling_unit("Lagos", "Ikeja", "Ward 3", "PU 007"),
                    agg(10),
                ),
            ],
        }
    }

    #[test]
    fn group_columns_include_ancestors() {
        assert_eq!(
            group_columns(LocationLevel::Ward),
            &["state", "lga", "ward"]
        );
    }

    #[test]
    fn filter_ignores_components_below_grouped_level() {
        let filter = LocationPath::ward("Lagos", "Ikeja", "Ward 3");
        let predicates = filter_predicates(LocationLevel::Lga, &filter);
        assert_eq!(predicates, vec![("state", "Lagos"), ("lga", "Ikeja")]);
    }

    #[test]
    fn filter_applies_component_at_grouped_level() {
        let filter = LocationPath::lga("Lagos", "Ikeja");
        let predicates = filter_predicates(LocationLevel::Lga, &filter);
        assert_eq!(predicates, vec![("state", "Lagos"), ("lga", "Ikeja")]);
    }

    #[test]
    fn national_filter_has_no_predicates() {
        let national = LocationPath::national();
        let predicates = filter_predicates(LocationLevel::PollingUnit, &national);
        assert!(predicates.is_empty());
    }

    #[test]
    fn find_matches_exact_path_only() {
        let levels = sample_levels();
        assert_eq!(
            levels.find(&LocationPath::state("Lagos")),
            Some(&agg(50))
        );
        assert_eq!(levels.find(&LocationPath::state("Oyo")), None);
        assert_eq!(levels.find(&LocationPath::national()), None);
    }

    #[test]
    fn nest_tree_builds_full_hierarchy() {
        let levels = sample_levels();
        let tree = nest_tree(&levels, &LocationPath::national());
        assert_eq!(tree.len(), 2);

        let lagos = tree.iter().find(|s| s.name == "Lagos").unwrap();
        assert_eq!(lagos.lgas.len(), 1);
        assert_eq!(lagos.lgas[0].wards.len(), 1);
        assert_eq!(lagos.lgas[0].wards[0].polling_units.len(), 2);
        assert_eq!(lagos.lgas[0].wards[0].polling_units[0].name, "PU 004");
    }

    #[test]
    fn nest_tree_confines_to_scope_state() {
        let levels = sample_levels();
        let tree = nest_tree(&levels, &LocationPath::state("Kano"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "Kano");
        assert_eq!(tree[0].lgas.len(), 1);
        assert_eq!(tree[0].lgas[0].name, "Tarauni");
    }

    #[test]
    fn polling_units_attach_only_to_their_ward() {
        let mut levels = sample_levels();
        levels.wards.push((
            LocationPath::ward("Lagos", "Ikeja", "Ward 5"),
            agg(0),
        ));
        let tree = nest_tree(&levels, &LocationPath::state("Lagos"));
        let wards = &tree[0].lgas[0].wards;
        let ward5 = wards.iter().find(|w| w.name == "Ward 5").unwrap();
        assert!(ward5.polling_units.is_empty());
    }
}
