//! Arena-indexed property graph types

use serde::{Deserialize, Serialize};

/// Stable arena index of a [`TypeNode`] within a [`TypeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The root type of a graph always occupies slot 0
    pub const ROOT: TypeId = TypeId(0);

    /// Slot index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One property of a type: a logical name backed by some accessor pair.
///
/// A property is represented only when it has a read accessor, a write
/// accessor, or both. Multiple accessor forms for one logical name (getter,
/// setter, public field) collapse into a single node with OR-ed flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyNode {
    /// Property name, unique within its owning type
    pub name: String,
    /// Declared type reference of the property value
    pub type_name: String,
    /// Whether a read accessor exists
    pub readable: bool,
    /// Whether a write accessor exists
    pub writable: bool,
    /// Nested type node for complex properties, `None` for terminal types
    pub nested: Option<TypeId>,
}

/// A source or target type participating in the mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeNode {
    /// Fully qualified type name
    pub name: String,
    /// Properties in declaration order (order drives diagnostic stability)
    pub properties: Vec<PropertyNode>,
    /// Enclosing type when this node is the nested target of a complex
    /// property; `None` for the root
    pub parent: Option<TypeId>,
}

impl TypeNode {
    /// Simple (unqualified) type name, as used in diagnostics
    pub fn simple_name(&self) -> &str {
        let tail = self.name.rsplit("::").next().unwrap_or(&self.name);
        tail.rsplit('.').next().unwrap_or(tail)
    }

    /// Look up a property by exact, case-sensitive name
    pub fn property(&self, name: &str) -> Option<&PropertyNode> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Arena of [`TypeNode`]s rooted at [`TypeId::ROOT`].
///
/// Built once per mapping-generation run and immutable afterwards; nodes
/// reference each other through stable [`TypeId`] indices, so a graph can be
/// shared freely across parallel mapping-method analyses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeGraph {
    types: Vec<TypeNode>,
}

impl TypeGraph {
    /// Id of the root type
    pub fn root(&self) -> TypeId {
        TypeId::ROOT
    }

    /// Number of type nodes in the graph
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the graph holds no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all type ids in arena order (parents before children)
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    /// The node behind an id. Ids are only handed out by this graph, so the
    /// slot always exists.
    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.types[id.index()]
    }

    /// Look up a property on a type by exact name
    pub fn property(&self, id: TypeId, name: &str) -> Option<&PropertyNode> {
        self.node(id).property(name)
    }

    /// The enclosing type and complex property that own a nested type node
    pub fn owner_property(&self, id: TypeId) -> Option<(TypeId, &PropertyNode)> {
        let parent = self.node(id).parent?;
        self.node(parent)
            .properties
            .iter()
            .find(|p| p.nested == Some(id))
            .map(|p| (parent, p))
    }

    /// Property-name path from the root down to a nested type node.
    /// Empty for the root itself.
    pub fn property_path(&self, id: TypeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some((parent, prop)) = self.owner_property(current) {
            path.push(prop.name.clone());
            current = parent;
        }
        path.reverse();
        path
    }

    pub(crate) fn push(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(node);
        id
    }

    pub(crate) fn node_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.types[id.index()]
    }
}
