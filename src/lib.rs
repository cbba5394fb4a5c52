//! Bean Mapping Core - property resolution and ignore propagation for
//! generated bean mappings
//!
//! Provides the analysis stage of a compile-time mapping generator:
//! - Property graph construction from type introspection
//! - Dotted ignore-path parsing and resolution, including nested targets
//! - Aggregation of ignore declarations per type node
//! - Mapping plan construction with unmapped-target suppression
//! - Validation with precise, source-located diagnostics
//!
//! The surrounding generator (declaration parsing, code emission,
//! diagnostics output) stays outside this crate; it talks to the engine
//! through [`TypeIntrospector`], [`MappingRequest`] and [`MethodOutcome`].
//!
//! # Example
//!
//! ```rust
//! use bean_mapping_core::{
//!     MappingRequest, PropertyAction, ResolverConfig, SourceLocation,
//!     StaticIntrospector, TypeDescription, TypeId, plan_mapping,
//! };
//!
//! let introspector = StaticIntrospector::new()
//!     .with_type(
//!         TypeDescription::new("Animal")
//!             .with_accessor("name", "String", true, false)
//!             .with_accessor("age", "Integer", true, false),
//!     )
//!     .with_type(
//!         TypeDescription::new("AnimalDto")
//!             .with_accessor("name", "String", true, true)
//!             .with_accessor("age", "Integer", true, true),
//!     );
//!
//! let request = MappingRequest::new("animalToDto", "Animal", "AnimalDto")
//!     .with_ignore("age", SourceLocation::new(12, 5));
//!
//! let outcome = plan_mapping(&request, &introspector, &ResolverConfig::default());
//! let plan = outcome.plan().expect("no hard errors");
//! assert_eq!(plan.action_for(TypeId::ROOT, "name"), Some(PropertyAction::Map));
//! assert_eq!(plan.action_for(TypeId::ROOT, "age"), Some(PropertyAction::Ignore));
//! assert!(plan.is_suppressed(TypeId::ROOT, "age"));
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod plan;
pub mod resolve;
pub mod validate;

// Re-export commonly used types
pub use config::{ResolverConfig, UnmappedTargetPolicy};
pub use error::{PlanError, PlanResult};
pub use graph::{
    AccessorEntry, GraphBuilder, PropertyNode, StaticIntrospector, TypeDescription, TypeGraph,
    TypeId, TypeIntrospector, TypeNode,
};
pub use pipeline::{
    IgnoreDeclaration, MappingRequest, MethodOutcome, plan_mapping, plan_mappings,
};
pub use plan::{
    ManualCoverage, MappingPlan, MirrorCoverage, PlanStats, PropertyAction, PropertyEntry,
    SourceCoverage, TypePlan, build_plan,
};
pub use resolve::{
    IgnorePath, IgnoreSets, PathError, PathStep, Resolution, ResolvedIgnore, SourceLocation,
    aggregate, resolve,
};
pub use validate::{Diagnostic, IgnoreOutcome, Severity, ValidationReport, Validator};
