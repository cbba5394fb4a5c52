//! Per-method resolution pipeline
//!
//! Drives one mapping method through the full engine: build the source and
//! target property graphs, resolve and aggregate the ignore declarations,
//! validate them, and build the final plan. Each method is processed in
//! isolation and fails fast on its own hard errors; sibling methods in the
//! same generation run are never affected.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{ResolverConfig, UnmappedTargetPolicy};
use crate::graph::{GraphBuilder, TypeIntrospector};
use crate::plan::{ManualCoverage, MappingPlan, MirrorCoverage, build_plan};
use crate::resolve::{IgnorePath, SourceLocation, aggregate};
use crate::validate::{Diagnostic, Severity, Validator};

/// One raw ignore declaration with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreDeclaration {
    /// Raw dotted target-property reference
    pub path: String,
    /// Where the declaration appeared
    pub location: SourceLocation,
}

/// A mapping method request as handed over by the declaration front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRequest {
    /// Mapping method name, used in logs
    pub method: String,
    /// Fully qualified source type
    pub source_type: String,
    /// Fully qualified target type
    pub target_type: String,
    /// Ignore declarations in declaration order
    pub ignores: Vec<IgnoreDeclaration>,
    /// Target properties referenced by manual mapping expressions
    pub manual_targets: Vec<String>,
    /// Treat every writable target property without a manual reference as
    /// explicitly ignored
    #[serde(default)]
    pub ignore_by_default: bool,
}

impl MappingRequest {
    /// Create a request without declarations
    pub fn new(
        method: impl Into<String>,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            source_type: source_type.into(),
            target_type: target_type.into(),
            ignores: Vec::new(),
            manual_targets: Vec::new(),
            ignore_by_default: false,
        }
    }

    /// Add an ignore declaration
    pub fn with_ignore(mut self, path: impl Into<String>, location: SourceLocation) -> Self {
        self.ignores.push(IgnoreDeclaration {
            path: path.into(),
            location,
        });
        self
    }

    /// Add a manual target-property reference
    pub fn with_manual_target(mut self, path: impl Into<String>) -> Self {
        self.manual_targets.push(path.into());
        self
    }

    /// Enable ignore-by-default semantics
    pub fn with_ignore_by_default(mut self, enabled: bool) -> Self {
        self.ignore_by_default = enabled;
        self
    }
}

/// Terminal state of one mapping method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodOutcome {
    /// The plan was finalized; diagnostics are warnings only
    Planned {
        plan: MappingPlan,
        diagnostics: Vec<Diagnostic>,
    },
    /// A hard error aborted generation for this method
    Aborted { diagnostics: Vec<Diagnostic> },
}

impl MethodOutcome {
    /// Whether a plan was produced
    pub fn is_planned(&self) -> bool {
        matches!(self, MethodOutcome::Planned { .. })
    }

    /// The finalized plan, if any
    pub fn plan(&self) -> Option<&MappingPlan> {
        match self {
            MethodOutcome::Planned { plan, .. } => Some(plan),
            MethodOutcome::Aborted { .. } => None,
        }
    }

    /// Diagnostics collected for this method
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            MethodOutcome::Planned { diagnostics, .. } => diagnostics,
            MethodOutcome::Aborted { diagnostics } => diagnostics,
        }
    }
}

/// Resolve one mapping method into a plan or a set of hard errors.
///
/// A root type the introspector cannot describe aborts this method only,
/// like any other hard error.
pub fn plan_mapping(
    request: &MappingRequest,
    introspector: &dyn TypeIntrospector,
    config: &ResolverConfig,
) -> MethodOutcome {
    let builder = GraphBuilder::new(introspector);
    let target = match builder.build(&request.target_type) {
        Ok(graph) => graph,
        Err(err) => return abort(&request.method, vec![Diagnostic::error(err.to_string(), None)]),
    };
    let source = match builder.build(&request.source_type) {
        Ok(graph) => graph,
        Err(err) => return abort(&request.method, vec![Diagnostic::error(err.to_string(), None)]),
    };

    let ignore_paths: Vec<IgnorePath> = request
        .ignores
        .iter()
        .map(|declaration| IgnorePath::parse(&declaration.path, declaration.location))
        .collect();
    let manual_paths: Vec<IgnorePath> = request
        .manual_targets
        .iter()
        .map(|path| IgnorePath::parse(path, SourceLocation::default()))
        .collect();

    let mut ignores = aggregate(&target, target.root(), &ignore_paths);

    if request.ignore_by_default {
        // a nested reference like `animal.age` keeps its root property too
        let manual_root: Vec<&str> = manual_paths
            .iter()
            .filter_map(|p| p.segments.first())
            .map(String::as_str)
            .collect();
        for property in &target.node(target.root()).properties {
            if property.writable && !manual_root.contains(&property.name.as_str()) {
                ignores.insert(target.root(), property.name.clone());
            }
        }
    }

    let report = Validator::new(&target, config).validate(&ignores, &manual_paths);
    if !report.is_ok() {
        return abort(&request.method, report.diagnostics);
    }

    let mirror = MirrorCoverage::new(&source);
    let coverage = ManualCoverage::new(&mirror, &manual_paths);
    let (plan, plan_diagnostics) = build_plan(&target, &ignores, &coverage, config);

    // warnings from validation (vacuous ignores) come first, then plan findings
    let mut diagnostics = report.diagnostics;
    diagnostics.extend(plan_diagnostics);

    if config.unmapped_target_policy == UnmappedTargetPolicy::Error
        && diagnostics.iter().any(|d| d.severity == Severity::Error)
    {
        return abort(&request.method, diagnostics);
    }

    MethodOutcome::Planned { plan, diagnostics }
}

/// Resolve several independent mapping methods.
///
/// One aborted method never blocks the others; the outcomes line up with
/// the requests.
pub fn plan_mappings(
    requests: &[MappingRequest],
    introspector: &dyn TypeIntrospector,
    config: &ResolverConfig,
) -> Vec<MethodOutcome> {
    requests
        .iter()
        .map(|request| plan_mapping(request, introspector, config))
        .collect()
}

fn abort(method: &str, diagnostics: Vec<Diagnostic>) -> MethodOutcome {
    warn!(
        method,
        errors = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count(),
        "mapping method aborted"
    );
    MethodOutcome::Aborted { diagnostics }
}
