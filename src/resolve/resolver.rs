//! Left-to-right resolution of ignore paths against a property graph

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::graph::{TypeGraph, TypeId};

use super::path::{IgnorePath, SourceLocation};

/// A path segment that failed to resolve.
///
/// `type_name` is the simple name of the type the segment was looked up on,
/// matching the wording of the generator's user-facing diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathError {
    /// No property with the segment's name exists on the current type
    #[error("Unknown property \"{name}\" referenced in ignore path at {location}.")]
    UnknownProperty {
        name: String,
        type_name: String,
        location: SourceLocation,
    },

    /// A non-terminal segment resolved to a property without nested
    /// structure, so resolution cannot descend further
    #[error("Cannot descend into property \"{name}\" in {type_name}: no nested properties.")]
    CannotDescend {
        name: String,
        type_name: String,
        location: SourceLocation,
    },
}

impl PathError {
    /// Source location of the failing declaration
    pub fn location(&self) -> SourceLocation {
        match self {
            PathError::UnknownProperty { location, .. } => *location,
            PathError::CannotDescend { location, .. } => *location,
        }
    }
}

/// One resolved step: the type a segment was looked up on and the property
/// it named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub type_id: TypeId,
    pub property: String,
}

/// A fully resolved ignore path, terminating at the property to exclude
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIgnore {
    /// One step per path segment, in order
    pub steps: Vec<PathStep>,
    /// Whether the terminating property has a write accessor
    pub writable: bool,
    /// Where the declaration appeared
    pub location: SourceLocation,
}

impl ResolvedIgnore {
    /// Type node owning the terminating property
    pub fn target_type(&self) -> TypeId {
        self.steps.last().map(|s| s.type_id).unwrap_or(TypeId::ROOT)
    }

    /// Name of the terminating property
    pub fn property(&self) -> &str {
        self.steps.last().map(|s| s.property.as_str()).unwrap_or("")
    }
}

/// Resolve an ignore path against the graph, starting at `root`.
///
/// Strictly left-to-right, case-sensitive, no backtracking: the first
/// failing segment decides the error, which keeps diagnostics precise and
/// resolution linear in path length.
pub fn resolve(
    graph: &TypeGraph,
    root: TypeId,
    path: &IgnorePath,
) -> Result<ResolvedIgnore, PathError> {
    let mut current = root;
    let mut steps = Vec::with_capacity(path.segments.len());
    let mut writable = false;

    for (position, segment) in path.segments.iter().enumerate() {
        let node = graph.node(current);
        let Some(property) = node.property(segment) else {
            return Err(PathError::UnknownProperty {
                name: segment.clone(),
                type_name: node.simple_name().to_string(),
                location: path.location,
            });
        };

        steps.push(PathStep {
            type_id: current,
            property: property.name.clone(),
        });

        if position + 1 < path.segments.len() {
            match property.nested {
                Some(next) => current = next,
                None => {
                    return Err(PathError::CannotDescend {
                        name: segment.clone(),
                        type_name: node.simple_name().to_string(),
                        location: path.location,
                    });
                }
            }
        } else {
            writable = property.writable;
        }
    }

    debug!(path = %path.raw, segments = steps.len(), "resolved ignore path");
    Ok(ResolvedIgnore {
        steps,
        writable,
        location: path.location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, StaticIntrospector, TypeDescription};

    fn zoo_graph() -> TypeGraph {
        let introspector = StaticIntrospector::new()
            .with_type(
                TypeDescription::new("ZooDto")
                    .with_accessor("animal", "AnimalDto", true, true)
                    .with_accessor("name", "String", true, true),
            )
            .with_type(
                TypeDescription::new("AnimalDto")
                    .with_accessor("age", "Integer", true, true)
                    .with_accessor("color", "String", true, false),
            );
        GraphBuilder::new(&introspector).build("ZooDto").unwrap()
    }

    fn path(raw: &str) -> IgnorePath {
        IgnorePath::parse(raw, SourceLocation::new(10, 5))
    }

    #[test]
    fn test_direct_property_resolves() {
        let graph = zoo_graph();
        let resolved = resolve(&graph, graph.root(), &path("name")).unwrap();
        assert_eq!(resolved.target_type(), graph.root());
        assert_eq!(resolved.property(), "name");
        assert!(resolved.writable);
    }

    #[test]
    fn test_nested_property_resolves() {
        let graph = zoo_graph();
        let resolved = resolve(&graph, graph.root(), &path("animal.age")).unwrap();

        assert_eq!(resolved.steps.len(), 2);
        assert_eq!(resolved.steps[0].type_id, graph.root());
        assert_eq!(resolved.steps[0].property, "animal");
        assert_ne!(resolved.target_type(), graph.root());
        assert_eq!(resolved.property(), "age");
    }

    #[test]
    fn test_read_only_terminal_resolves_as_unwritable() {
        let graph = zoo_graph();
        let resolved = resolve(&graph, graph.root(), &path("animal.color")).unwrap();
        assert!(!resolved.writable);
    }

    #[test]
    fn test_unknown_property() {
        let graph = zoo_graph();
        let err = resolve(&graph, graph.root(), &path("tail")).unwrap_err();
        assert!(matches!(
            &err,
            PathError::UnknownProperty { name, type_name, .. }
                if name == "tail" && type_name == "ZooDto"
        ));
        assert_eq!(
            err.to_string(),
            "Unknown property \"tail\" referenced in ignore path at line 10, column 5."
        );
    }

    #[test]
    fn test_unknown_property_in_nested_type() {
        let graph = zoo_graph();
        let err = resolve(&graph, graph.root(), &path("animal.tail")).unwrap_err();
        assert!(matches!(
            err,
            PathError::UnknownProperty { name, type_name, .. }
                if name == "tail" && type_name == "AnimalDto"
        ));
    }

    #[test]
    fn test_cannot_descend_through_terminal_property() {
        let graph = zoo_graph();
        let err = resolve(&graph, graph.root(), &path("name.length")).unwrap_err();
        assert!(matches!(
            &err,
            PathError::CannotDescend { name, type_name, .. }
                if name == "name" && type_name == "ZooDto"
        ));
        assert_eq!(
            err.to_string(),
            "Cannot descend into property \"name\" in ZooDto: no nested properties."
        );
    }

    #[test]
    fn test_empty_segment_fails_as_unknown() {
        let graph = zoo_graph();
        let err = resolve(&graph, graph.root(), &path("animal..age")).unwrap_err();
        assert!(matches!(err, PathError::UnknownProperty { name, .. } if name.is_empty()));
    }
}
