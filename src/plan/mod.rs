//! Mapping plan construction
//!
//! Combines the full property graph with the aggregated ignore sets to
//! produce the final plan consumed by the code emitter: per type node, which
//! properties to copy and which to skip, plus suppression flags so that
//! explicitly ignored properties never raise unmapped-target diagnostics.

mod builder;
mod types;

pub use builder::{ManualCoverage, MirrorCoverage, SourceCoverage, build_plan};
pub use types::{MappingPlan, PlanStats, PropertyAction, PropertyEntry, TypePlan};
