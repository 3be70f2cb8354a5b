//! Role-scoped dashboard assembly.
//!
//! Orchestrates the rollup: resolves the viewer's scope, fans out the
//! level aggregations, merges them with the reference register, and
//! emits the nested view plus roll-up totals for the scope root itself.
//! No partial results — any failed branch fails the whole request.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use switchy_database::Database;
use voter_reach_engagement_models::{
    DashboardView, MemberIdentity, NodeStats, ObservedAggregate, ViewerScope,
};
use voter_reach_location_models::{LocationLevel, LocationPath};
use voter_reach_reference::ReferenceRegistry;

use crate::aggregate::{self, LevelMaps};
use crate::placeholder::PlaceholderPolicy;
use crate::{EngagementError, estimate, scope};

/// Assembles role-scoped dashboard views.
///
/// Holds the reference registry and placeholder policy as injected
/// collaborators so tests can substitute fixtures for both.
pub struct DashboardAssembler {
    registry: Arc<ReferenceRegistry>,
    placeholders: Arc<dyn PlaceholderPolicy>,
}

impl DashboardAssembler {
    /// Creates an assembler over the given registry and placeholder
    /// policy.
    #[must_use]
    pub fn new(registry: Arc<ReferenceRegistry>, placeholders: Arc<dyn PlaceholderPolicy>) -> Self {
        Self {
            registry,
            placeholders,
        }
    }

    /// Resolves the caller's scope, fetches the level aggregations, and
    /// composes the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementError::MissingAssignment`] or
    /// [`EngagementError::Forbidden`] from scope resolution, and
    /// [`EngagementError::Database`] if any aggregate query fails.
    pub async fn assemble(
        &self,
        db: &dyn Database,
        identity: &MemberIdentity,
    ) -> Result<DashboardView, EngagementError> {
        let scope = scope::resolve(identity)?;
        let levels = aggregate::observed_levels(db, &scope.root).await?;
        Ok(self.compose(scope, &levels))
    }

    /// Composes a dashboard from already-fetched level aggregations.
    ///
    /// Pure with respect to the record store — two calls over the same
    /// inputs produce identical output.
    #[must_use]
    pub fn compose(&self, scope: ViewerScope, levels: &LevelMaps) -> DashboardView {
        let hierarchy = aggregate::nest_tree(levels, &scope.root);
        let (root, children) = if let Some(state_name) = scope.root.state.as_deref() {
            self.compose_scoped(&scope, state_name, levels)
        } else {
            self.compose_national(levels)
        };

        DashboardView {
            scope,
            root,
            children,
            hierarchy,
        }
    }

    /// National view: one child per state in the union of the register
    /// and the observed data, zero-filled where unobserved; root is the
    /// nationwide merge.
    fn compose_national(&self, levels: &LevelMaps) -> (NodeStats, Vec<NodeStats>) {
        let observed_states: BTreeMap<&str, &ObservedAggregate> = levels
            .states
            .iter()
            .filter_map(|(path, aggregate)| path.name().map(|name| (name, aggregate)))
            .collect();

        let mut names: BTreeSet<&str> = self.registry.states().collect();
        names.extend(observed_states.keys().copied());

        let children = names
            .into_iter()
            .map(|name| {
                let observed = observed_states
                    .get(name)
                    .map_or_else(ObservedAggregate::default, |&aggregate| aggregate.clone());
                let metrics = estimate::estimate(
                    &observed,
                    LocationLevel::State,
                    observed.total_members,
                    self.registry.total_for(name),
                );
                NodeStats {
                    name: name.to_string(),
                    path: LocationPath::state(name),
                    level: Some(LocationLevel::State),
                    observed,
                    metrics,
                }
            })
            .collect();

        let mut nationwide = ObservedAggregate::default();
        for (_, aggregate) in &levels.states {
            nationwide.merge(aggregate);
        }
        let metrics = estimate::metrics(&nationwide, self.registry.national_total(), false);
        let root = NodeStats {
            name: LocationPath::national().label(),
            path: LocationPath::national(),
            level: None,
            observed: nationwide,
            metrics,
        };

        (root, children)
    }

    /// Sub-state view: children are the scope's child level, each
    /// estimated against the root *state's* observed total and register
    /// figure; root stats are computed the same way for the scope root.
    fn compose_scoped(
        &self,
        scope: &ViewerScope,
        state_name: &str,
        levels: &LevelMaps,
    ) -> (NodeStats, Vec<NodeStats>) {
        let state_reference = self.registry.total_for(state_name);
        let state_observed = levels
            .find(&LocationPath::state(state_name))
            .cloned()
            .unwrap_or_default();

        let mut children: Vec<NodeStats> = levels
            .at(scope.child_level)
            .iter()
            .filter(|(path, _)| path.is_within(&scope.root))
            .map(|(path, observed)| NodeStats {
                name: path.name().unwrap_or_default().to_string(),
                path: path.clone(),
                level: Some(scope.child_level),
                observed: observed.clone(),
                metrics: estimate::estimate(
                    observed,
                    scope.child_level,
                    state_observed.total_members,
                    state_reference,
                ),
            })
            .collect();

        if children.is_empty() {
            log::debug!(
                "no observed {} rows under {}; rendering placeholders",
                scope.child_level,
                scope.root.label()
            );
            children = self.placeholder_children(scope, state_reference);
        }

        let root_observed = levels.find(&scope.root).cloned().unwrap_or_default();
        let metrics = scope.root.level().map_or_else(
            || estimate::metrics(&root_observed, state_reference, false),
            |level| {
                estimate::estimate(
                    &root_observed,
                    level,
                    state_observed.total_members,
                    state_reference,
                )
            },
        );
        let root = NodeStats {
            name: scope.root.name().unwrap_or_default().to_string(),
            path: scope.root.clone(),
            level: scope.root.level(),
            observed: root_observed,
            metrics,
        };

        (root, children)
    }

    /// Placeholder children for a subtree with no observed data: zero
    /// observed counts, an even share of the state's register total,
    /// every node flagged as estimated.
    fn placeholder_children(&self, scope: &ViewerScope, state_reference: u64) -> Vec<NodeStats> {
        let names = self.placeholders.placeholder_names(scope.child_level);
        let Ok(count) = u64::try_from(names.len()) else {
            return Vec::new();
        };
        if count == 0 {
            return Vec::new();
        }
        let share = state_reference / count;

        names
            .into_iter()
            .map(|name| NodeStats {
                path: scope.root.child(name.clone()),
                level: Some(scope.child_level),
                observed: ObservedAggregate::default(),
                metrics: estimate::metrics(&ObservedAggregate::default(), share, true),
                name,
            })
            .collect()
    }
}
