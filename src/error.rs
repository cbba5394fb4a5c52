//! Error types for mapping-plan construction

use thiserror::Error;

/// Errors that can occur while building a property graph or loading
/// introspection data.
///
/// Validation findings are not errors at this level: they are collected as
/// [`Diagnostic`](crate::validate::Diagnostic) values so that one failing
/// mapping method never aborts its siblings.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The introspection collaborator has no description for a requested
    /// root type
    #[error("Unknown type: no introspection data for \"{0}\"")]
    UnknownType(String),

    /// Failed to parse introspection data
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for plan-construction operations
pub type PlanResult<T> = Result<T, PlanError>;
