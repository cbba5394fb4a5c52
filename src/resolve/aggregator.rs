//! Aggregation of ignore declarations into per-type exclusion sets

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::graph::{TypeGraph, TypeId};

use super::path::IgnorePath;
use super::resolver::{PathError, ResolvedIgnore, resolve};

/// Outcome of resolving one ignore declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path resolved to a concrete target property
    Resolved(ResolvedIgnore),
    /// A segment failed to resolve; forwarded to the validator
    Failed(PathError),
}

/// Ignore declarations partitioned by the type node they terminate at.
///
/// Failures are kept alongside successes, in declaration order, so the
/// validator sees every declaration exactly once. A failed declaration
/// contributes nothing to the exclusion sets: its property stays
/// mapped-by-default.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSets {
    by_type: HashMap<TypeId, BTreeSet<String>>,
    resolutions: Vec<Resolution>,
}

impl IgnoreSets {
    /// Excluded property names for a type, if any
    pub fn names(&self, type_id: TypeId) -> Option<&BTreeSet<String>> {
        self.by_type.get(&type_id)
    }

    /// Whether a property of a type is excluded
    pub fn is_ignored(&self, type_id: TypeId, property: &str) -> bool {
        self.by_type
            .get(&type_id)
            .is_some_and(|names| names.contains(property))
    }

    /// Mark a property as explicitly excluded. Idempotent.
    pub fn insert(&mut self, type_id: TypeId, property: impl Into<String>) -> bool {
        self.by_type.entry(type_id).or_default().insert(property.into())
    }

    /// All per-declaration outcomes, in declaration order
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Successfully resolved declarations
    pub fn resolved(&self) -> impl Iterator<Item = &ResolvedIgnore> {
        self.resolutions.iter().filter_map(|r| match r {
            Resolution::Resolved(resolved) => Some(resolved),
            Resolution::Failed(_) => None,
        })
    }

    /// Declarations whose path failed to resolve
    pub fn failures(&self) -> impl Iterator<Item = &PathError> {
        self.resolutions.iter().filter_map(|r| match r {
            Resolution::Failed(err) => Some(err),
            Resolution::Resolved(_) => None,
        })
    }

    /// Whether any declaration failed to resolve
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Resolve every ignore declaration and group successes by terminating type.
///
/// Duplicate ignores of one `(type, property)` pair collapse into a single
/// set entry; each declaration still gets its own resolution outcome.
pub fn aggregate(graph: &TypeGraph, root: TypeId, paths: &[IgnorePath]) -> IgnoreSets {
    let mut sets = IgnoreSets::default();

    for path in paths {
        match resolve(graph, root, path) {
            Ok(resolved) => {
                let inserted = sets.insert(resolved.target_type(), resolved.property());
                if !inserted {
                    debug!(path = %path.raw, "duplicate ignore declaration, already excluded");
                }
                sets.resolutions.push(Resolution::Resolved(resolved));
            }
            Err(err) => {
                warn!(path = %path.raw, error = %err, "ignore path failed to resolve");
                sets.resolutions.push(Resolution::Failed(err));
            }
        }
    }

    sets
}
