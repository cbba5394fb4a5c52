//! Ignore-path parsing, resolution and aggregation
//!
//! Turns raw dotted ignore declarations (`animal.age`) into resolved
//! references against the target property graph, then partitions them by
//! the type node they apply to. Declarations that fail to resolve are
//! forwarded to the validator rather than silently dropped.

mod aggregator;
mod path;
mod resolver;

pub use aggregator::{IgnoreSets, Resolution, aggregate};
pub use path::{IgnorePath, SourceLocation};
pub use resolver::{PathError, PathStep, ResolvedIgnore, resolve};
