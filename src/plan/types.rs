//! Types for finalized mapping plans

use serde::{Deserialize, Serialize};

use crate::graph::TypeId;

/// What the code emitter should do with one target property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyAction {
    /// Copy the matching source property
    Map,
    /// Skip the property
    Ignore,
}

/// Plan entry for one target property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Property name
    pub name: String,
    /// Map or ignore
    pub action: PropertyAction,
    /// True when the exclusion was explicitly declared; suppresses the
    /// unmapped-target diagnostic for this property
    pub explicit: bool,
    /// Whether the property has a write accessor
    pub writable: bool,
}

/// Plan for one participating type node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePlan {
    /// Arena id of the type in the property graph
    pub type_id: TypeId,
    /// Fully qualified type name
    pub type_name: String,
    /// One entry per property, in declaration order
    pub entries: Vec<PropertyEntry>,
}

impl TypePlan {
    /// Look up an entry by property name
    pub fn entry(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Properties the emitter must populate
    pub fn mapped(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == PropertyAction::Map)
    }

    /// Properties the emitter must skip
    pub fn ignored(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == PropertyAction::Ignore)
    }
}

/// Finalized per-type, per-property plan handed to the code emitter.
///
/// Covers the root type and every nested type reachable through it; every
/// property of every covered type has exactly one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingPlan {
    /// Per-type plans, index-aligned with the graph's arena order
    pub types: Vec<TypePlan>,
    /// Summary statistics
    pub stats: PlanStats,
}

impl MappingPlan {
    /// Plan for the root target type, `None` for an empty plan
    pub fn root(&self) -> Option<&TypePlan> {
        self.types.first()
    }

    /// Plan for a specific type node
    pub fn for_type(&self, id: TypeId) -> Option<&TypePlan> {
        self.types.get(id.index())
    }

    /// Action assigned to a property, if the type and property exist
    pub fn action_for(&self, id: TypeId, property: &str) -> Option<PropertyAction> {
        self.for_type(id)?.entry(property).map(|e| e.action)
    }

    /// Whether the unmapped-target diagnostic is suppressed for a property
    pub fn is_suppressed(&self, id: TypeId, property: &str) -> bool {
        self.for_type(id)
            .and_then(|t| t.entry(property))
            .is_some_and(|e| e.explicit)
    }
}

/// Statistics about a mapping plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanStats {
    /// Participating type nodes
    pub types: usize,
    /// Total property entries across all types
    pub properties: usize,
    /// Properties assigned `Map`
    pub mapped: usize,
    /// Properties excluded by an explicit ignore
    pub explicit_ignores: usize,
    /// Writable properties neither mapped nor explicitly ignored, counted
    /// on types reachable through mapped properties
    pub unmapped: usize,
}

impl PlanStats {
    /// Share of addressed writable target properties: mapped plus
    /// explicitly ignored, over all that plus unmapped
    pub fn coverage(&self) -> f64 {
        let addressed = self.mapped + self.explicit_ignores;
        let total = addressed + self.unmapped;
        if total == 0 {
            return 1.0;
        }
        addressed as f64 / total as f64
    }
}
