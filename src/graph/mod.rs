//! Property graph model
//!
//! Represents source and target types as trees of accessible properties: a
//! read accessor on the source side, a write accessor on the target side,
//! nested complex properties descending into their own type nodes. Nodes
//! live in an arena and are addressed by stable [`TypeId`] indices, so a
//! built graph is immutable and freely shareable across parallel
//! mapping-method analyses.

mod builder;
mod node;

pub use builder::{
    AccessorEntry, GraphBuilder, StaticIntrospector, TypeDescription, TypeIntrospector,
};
pub use node::{PropertyNode, TypeGraph, TypeId, TypeNode};
