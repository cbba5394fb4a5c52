//! Mapping plan construction

use std::collections::HashSet;

use tracing::debug;

use crate::config::{ResolverConfig, UnmappedTargetPolicy};
use crate::graph::TypeGraph;
use crate::resolve::{IgnorePath, IgnoreSets};
use crate::validate::{Diagnostic, Severity};

use super::types::{MappingPlan, PlanStats, PropertyAction, PropertyEntry, TypePlan};

/// Source-side matching strategy.
///
/// Deciding which source property feeds a target property is not part of
/// this core; the plan builder only asks whether a readable counterpart
/// exists. `target_path` is the property-name chain from the root target
/// type down to the type owning `property` (empty for the root itself).
pub trait SourceCoverage {
    /// Whether the target property has a readable source counterpart
    fn has_readable_source(&self, target_path: &[String], property: &str) -> bool;
}

/// Same-name matching over a source property graph.
///
/// Descends the source graph along the target path and looks for a readable
/// property with the same name, which is the default strategy of the
/// surrounding generator.
pub struct MirrorCoverage<'a> {
    source: &'a TypeGraph,
}

impl<'a> MirrorCoverage<'a> {
    /// Create a coverage view over a source graph
    pub fn new(source: &'a TypeGraph) -> Self {
        Self { source }
    }
}

impl SourceCoverage for MirrorCoverage<'_> {
    fn has_readable_source(&self, target_path: &[String], property: &str) -> bool {
        let mut current = self.source.root();
        for segment in target_path {
            let Some(step) = self.source.node(current).property(segment) else {
                return false;
            };
            if !step.readable {
                return false;
            }
            let Some(nested) = step.nested else {
                return false;
            };
            current = nested;
        }
        self.source
            .node(current)
            .property(property)
            .is_some_and(|p| p.readable)
    }
}

/// Coverage overlay for manually mapped target properties.
///
/// A property populated by a hand-written mapping expression needs no
/// same-name source counterpart, and neither do the complex properties its
/// reference descends through. Everything else falls through to the wrapped
/// strategy.
pub struct ManualCoverage<'a> {
    base: &'a dyn SourceCoverage,
    targets: HashSet<Vec<String>>,
}

impl<'a> ManualCoverage<'a> {
    /// Wrap a base strategy with the method's manual target references
    pub fn new(base: &'a dyn SourceCoverage, manual: &[IgnorePath]) -> Self {
        let mut targets = HashSet::new();
        for path in manual {
            // every prefix counts: setting `a.b` requires populating `a`
            for end in 1..=path.segments.len() {
                targets.insert(path.segments[..end].to_vec());
            }
        }
        Self { base, targets }
    }
}

impl SourceCoverage for ManualCoverage<'_> {
    fn has_readable_source(&self, target_path: &[String], property: &str) -> bool {
        let mut full = target_path.to_vec();
        full.push(property.to_string());
        self.targets.contains(&full) || self.base.has_readable_source(target_path, property)
    }
}

/// Merge the property graph with the aggregated ignore sets into a final
/// plan.
///
/// Every property of every type gets exactly one entry: `Ignore` when the
/// type's exclusion set names it (explicitly, whether or not a write
/// accessor exists), otherwise `Map` when the property is writable and a
/// readable source counterpart exists, otherwise an implicit `Ignore`.
/// Implicitly ignored writable properties produce unmapped-target
/// diagnostics at the configured severity, but only on types reachable
/// through mapped properties: a subtree skipped by its enclosing property
/// is never emitted, so it cannot be incomplete.
pub fn build_plan(
    graph: &TypeGraph,
    ignores: &IgnoreSets,
    coverage: &dyn SourceCoverage,
    config: &ResolverConfig,
) -> (MappingPlan, Vec<Diagnostic>) {
    let mut types = Vec::with_capacity(graph.len());
    let mut reachable = vec![false; graph.len()];
    let mut stats = PlanStats {
        types: graph.len(),
        ..PlanStats::default()
    };
    let mut diagnostics = Vec::new();

    for id in graph.ids() {
        let node = graph.node(id);
        reachable[id.index()] = match graph.owner_property(id) {
            None => true,
            Some((parent, owner)) => {
                // arena order guarantees the parent plan is already built
                let parent_plan: &TypePlan = &types[parent.index()];
                reachable[parent.index()]
                    && parent_plan
                        .entry(&owner.name)
                        .is_some_and(|e| e.action == PropertyAction::Map)
            }
        };

        let target_path = graph.property_path(id);
        let mut entries = Vec::with_capacity(node.properties.len());

        for property in &node.properties {
            let (action, explicit) = if ignores.is_ignored(id, &property.name) {
                (PropertyAction::Ignore, true)
            } else if property.writable
                && coverage.has_readable_source(&target_path, &property.name)
            {
                (PropertyAction::Map, false)
            } else {
                (PropertyAction::Ignore, false)
            };

            stats.properties += 1;
            match (action, explicit) {
                (PropertyAction::Map, _) => stats.mapped += 1,
                (PropertyAction::Ignore, true) => stats.explicit_ignores += 1,
                (PropertyAction::Ignore, false) => {
                    if property.writable && reachable[id.index()] {
                        stats.unmapped += 1;
                        match config.unmapped_target_policy {
                            UnmappedTargetPolicy::Ignore => {}
                            policy => {
                                let severity = if policy == UnmappedTargetPolicy::Error {
                                    Severity::Error
                                } else {
                                    Severity::Warning
                                };
                                diagnostics.push(Diagnostic {
                                    severity,
                                    location: None,
                                    message: format!(
                                        "Unmapped target property: \"{}\" in {}.",
                                        property.name,
                                        node.simple_name()
                                    ),
                                });
                            }
                        }
                    }
                }
            }

            entries.push(PropertyEntry {
                name: property.name.clone(),
                action,
                explicit,
                writable: property.writable,
            });
        }

        types.push(TypePlan {
            type_id: id,
            type_name: node.name.clone(),
            entries,
        });
    }

    debug!(
        types = stats.types,
        mapped = stats.mapped,
        explicit_ignores = stats.explicit_ignores,
        unmapped = stats.unmapped,
        "built mapping plan"
    );
    (MappingPlan { types, stats }, diagnostics)
}
