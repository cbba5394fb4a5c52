//! Property graph construction from type introspection

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, PlanResult};

use super::node::{PropertyNode, TypeGraph, TypeId, TypeNode};

/// Accessor introspection collaborator.
///
/// The front-end owns how accessors are discovered (getters, setters, public
/// fields); this core only queries the normalized result. A type for which
/// `describe` returns `None` is terminal: properties of that type cannot be
/// descended into.
pub trait TypeIntrospector {
    /// Describe a type by its fully qualified name
    fn describe(&self, type_name: &str) -> Option<TypeDescription>;
}

/// Introspection result for one type: its accessors in declaration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDescription {
    /// Fully qualified type name
    pub name: String,
    /// One entry per discovered accessor; several entries may share a
    /// property name and are collapsed during graph construction
    pub accessors: Vec<AccessorEntry>,
}

impl TypeDescription {
    /// Create an empty description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accessors: Vec::new(),
        }
    }

    /// Add an accessor entry
    pub fn with_accessor(
        mut self,
        property: impl Into<String>,
        type_name: impl Into<String>,
        read: bool,
        write: bool,
    ) -> Self {
        self.accessors.push(AccessorEntry {
            property: property.into(),
            type_name: type_name.into(),
            read,
            write,
        });
        self
    }
}

/// One discovered accessor, normalized to a (read, write) capability pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessorEntry {
    /// Logical property name the accessor contributes to
    pub property: String,
    /// Declared type of the property value
    pub type_name: String,
    /// Whether this accessor can read the value
    #[serde(default)]
    pub read: bool,
    /// Whether this accessor can write the value
    #[serde(default)]
    pub write: bool,
}

/// In-memory introspector backed by a fixed set of type descriptions.
///
/// Used by tests and by embedders that already hold the reflective data;
/// production front-ends implement [`TypeIntrospector`] directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticIntrospector {
    types: HashMap<String, TypeDescription>,
}

impl StaticIntrospector {
    /// Create an empty introspector
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type description
    pub fn with_type(mut self, description: TypeDescription) -> Self {
        self.types.insert(description.name.clone(), description);
        self
    }

    /// Load descriptions from a JSON array of [`TypeDescription`]s
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let descriptions: Vec<TypeDescription> = serde_json::from_str(json)?;
        let mut introspector = Self::new();
        for description in descriptions {
            introspector = introspector.with_type(description);
        }
        Ok(introspector)
    }
}

impl TypeIntrospector for StaticIntrospector {
    fn describe(&self, type_name: &str) -> Option<TypeDescription> {
        self.types.get(type_name).cloned()
    }
}

/// Builds an immutable [`TypeGraph`] from an introspection collaborator
pub struct GraphBuilder<'a> {
    introspector: &'a dyn TypeIntrospector,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder over an introspector
    pub fn new(introspector: &'a dyn TypeIntrospector) -> Self {
        Self { introspector }
    }

    /// Build the graph rooted at the given type.
    ///
    /// Nested complex properties recurse through the introspector. A nested
    /// type already on the construction stack is treated as terminal, so
    /// recursive type references never expand into an infinite tree.
    pub fn build(&self, root_type: &str) -> PlanResult<TypeGraph> {
        let description = self
            .introspector
            .describe(root_type)
            .ok_or_else(|| PlanError::UnknownType(root_type.to_string()))?;

        let mut graph = TypeGraph::default();
        let mut stack = vec![description.name.clone()];
        self.build_type(&mut graph, &description, None, &mut stack);

        debug!(
            root = root_type,
            types = graph.len(),
            properties = graph.ids().map(|id| graph.node(id).properties.len()).sum::<usize>(),
            "built property graph"
        );
        Ok(graph)
    }

    fn build_type(
        &self,
        graph: &mut TypeGraph,
        description: &TypeDescription,
        parent: Option<TypeId>,
        stack: &mut Vec<String>,
    ) -> TypeId {
        let id = graph.push(TypeNode {
            name: description.name.clone(),
            properties: Vec::new(),
            parent,
        });

        for (name, type_name, readable, writable) in collapse_accessors(&description.accessors) {
            let nested = if stack.contains(&type_name) {
                None
            } else {
                self.introspector.describe(&type_name).map(|nested_desc| {
                    stack.push(nested_desc.name.clone());
                    let nested_id = self.build_type(graph, &nested_desc, Some(id), stack);
                    stack.pop();
                    nested_id
                })
            };

            graph.node_mut(id).properties.push(PropertyNode {
                name,
                type_name,
                readable,
                writable,
                nested,
            });
        }

        id
    }
}

/// Collapse accessor entries per logical property name, OR-ing capabilities.
///
/// First-seen order is preserved; entries contributing neither capability do
/// not produce a property. The declared type of the first entry wins when
/// forms disagree.
fn collapse_accessors(accessors: &[AccessorEntry]) -> Vec<(String, String, bool, bool)> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, (String, bool, bool)> = HashMap::new();

    for entry in accessors {
        match merged.get_mut(&entry.property) {
            Some((_, read, write)) => {
                *read |= entry.read;
                *write |= entry.write;
            }
            None => {
                order.push(entry.property.clone());
                merged.insert(
                    entry.property.clone(),
                    (entry.type_name.clone(), entry.read, entry.write),
                );
            }
        }
    }

    order
        .into_iter()
        .filter_map(|name| {
            let (type_name, read, write) = merged.remove(&name)?;
            if !read && !write {
                return None;
            }
            Some((name, type_name, read, write))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_introspector() -> StaticIntrospector {
        StaticIntrospector::new().with_type(
            TypeDescription::new("AnimalDto")
                .with_accessor("name", "String", true, true)
                .with_accessor("age", "Integer", true, false)
                .with_accessor("age", "Integer", false, true)
                .with_accessor("phantom", "String", false, false),
        )
    }

    #[test]
    fn test_build_unknown_type_fails() {
        let introspector = StaticIntrospector::new();
        let result = GraphBuilder::new(&introspector).build("Missing");
        assert!(matches!(result, Err(PlanError::UnknownType(name)) if name == "Missing"));
    }

    #[test]
    fn test_accessor_forms_collapse() {
        let introspector = animal_introspector();
        let graph = GraphBuilder::new(&introspector).build("AnimalDto").unwrap();
        let root = graph.node(graph.root());

        // getter-only and setter-only forms combine into one property
        let age = root.property("age").unwrap();
        assert!(age.readable);
        assert!(age.writable);

        // a name with neither capability is not represented
        assert!(root.property("phantom").is_none());
        assert_eq!(root.properties.len(), 2);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let introspector = animal_introspector();
        let graph = GraphBuilder::new(&introspector).build("AnimalDto").unwrap();
        let names: Vec<&str> = graph
            .node(graph.root())
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn test_nested_type_descends() {
        let introspector = StaticIntrospector::new()
            .with_type(
                TypeDescription::new("ZooDto").with_accessor("animal", "AnimalDto", true, true),
            )
            .with_type(TypeDescription::new("AnimalDto").with_accessor(
                "name",
                "String",
                true,
                true,
            ));

        let graph = GraphBuilder::new(&introspector).build("ZooDto").unwrap();
        assert_eq!(graph.len(), 2);

        let animal = graph.property(graph.root(), "animal").unwrap();
        let nested = animal.nested.expect("complex property has a nested type");
        assert_eq!(graph.node(nested).name, "AnimalDto");
        assert_eq!(graph.node(nested).parent, Some(graph.root()));
    }

    #[test]
    fn test_recursive_type_is_terminal() {
        let introspector = StaticIntrospector::new().with_type(
            TypeDescription::new("TreeNode")
                .with_accessor("value", "String", true, true)
                .with_accessor("child", "TreeNode", true, true),
        );

        let graph = GraphBuilder::new(&introspector).build("TreeNode").unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.property(graph.root(), "child").unwrap().nested.is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "name": "AnimalDto",
                "accessors": [
                    {"property": "name", "type_name": "String", "read": true, "write": true}
                ]
            }
        ]"#;
        let introspector = StaticIntrospector::from_json(json).unwrap();
        let graph = GraphBuilder::new(&introspector).build("AnimalDto").unwrap();
        assert_eq!(graph.node(graph.root()).properties.len(), 1);
    }
}
