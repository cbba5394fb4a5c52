//! Validation of ignore declarations
//!
//! Inspects every resolution outcome forwarded by the aggregator and decides
//! its fate: path failures are always hard errors, an ignore of a write-less
//! property that is independently referenced by a manual mapping is a hard
//! error, and every other ignore is accepted (a write-less ignore with no
//! other reference is vacuously satisfied). Findings are expressed as
//! values, never panics or early returns, so a failing mapping method cannot
//! abort its siblings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::graph::{TypeGraph, TypeId};
use crate::resolve::{IgnorePath, IgnoreSets, Resolution, SourceLocation, resolve};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A user-facing finding with optional source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Option<SourceLocation>,
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message: message.into(),
        }
    }
}

/// Terminal state of one ignore declaration after validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IgnoreOutcome {
    /// Property excluded from the plan, unmapped-target diagnostic
    /// suppressed
    Accepted,
    /// Resolved, but ignoring it conflicts with a manual reference to the
    /// same write-less property
    Rejected { diagnostic: Diagnostic },
    /// The path never resolved
    Failed { diagnostic: Diagnostic },
}

/// Validation result for one mapping method's declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One outcome per ignore declaration, in declaration order
    pub outcomes: Vec<IgnoreOutcome>,
    /// Diagnostics produced by rejected and failed declarations, plus
    /// optional vacuous-ignore warnings
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Whether generation may proceed (no error-severity findings)
    pub fn is_ok(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.severity != Severity::Error)
    }

    /// Error-severity diagnostics
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

/// Validates aggregated ignore declarations against the target graph
pub struct Validator<'a> {
    graph: &'a TypeGraph,
    config: &'a ResolverConfig,
}

impl<'a> Validator<'a> {
    /// Create a validator over a target graph
    pub fn new(graph: &'a TypeGraph, config: &'a ResolverConfig) -> Self {
        Self { graph, config }
    }

    /// Inspect every resolution outcome.
    ///
    /// `manual_references` are the target-property references named by
    /// manual mapping expressions in the same method. References that do
    /// not resolve are skipped here: the declaration front-end owns their
    /// diagnostics.
    pub fn validate(
        &self,
        ignores: &IgnoreSets,
        manual_references: &[IgnorePath],
    ) -> ValidationReport {
        let manual: HashSet<(TypeId, String)> = manual_references
            .iter()
            .filter_map(|path| resolve(self.graph, self.graph.root(), path).ok())
            .map(|r| (r.target_type(), r.property().to_string()))
            .collect();

        let mut report = ValidationReport::default();

        for resolution in ignores.resolutions() {
            let outcome = match resolution {
                Resolution::Failed(err) => {
                    let diagnostic = Diagnostic::error(err.to_string(), Some(err.location()));
                    report.diagnostics.push(diagnostic.clone());
                    IgnoreOutcome::Failed { diagnostic }
                }
                Resolution::Resolved(resolved) if !resolved.writable => {
                    let owner = self.graph.node(resolved.target_type());
                    let key = (resolved.target_type(), resolved.property().to_string());
                    if manual.contains(&key) {
                        let diagnostic = Diagnostic::error(
                            format!(
                                "Property \"{}\" has no write accessor in {}.",
                                resolved.property(),
                                owner.simple_name()
                            ),
                            Some(resolved.location),
                        );
                        report.diagnostics.push(diagnostic.clone());
                        IgnoreOutcome::Rejected { diagnostic }
                    } else {
                        // vacuous: the property was never going to be mapped
                        if self.config.report_vacuous_ignores {
                            report.diagnostics.push(Diagnostic::warning(
                                format!(
                                    "Ignored property \"{}\" in {} has no write accessor; the ignore has no effect.",
                                    resolved.property(),
                                    owner.simple_name()
                                ),
                                Some(resolved.location),
                            ));
                        }
                        IgnoreOutcome::Accepted
                    }
                }
                Resolution::Resolved(_) => IgnoreOutcome::Accepted,
            };
            report.outcomes.push(outcome);
        }

        debug!(
            declarations = report.outcomes.len(),
            errors = report.errors().count(),
            "validated ignore declarations"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, StaticIntrospector, TypeDescription};
    use crate::resolve::aggregate;

    fn preditor_graph() -> TypeGraph {
        let introspector = StaticIntrospector::new().with_type(
            TypeDescription::new("PreditorDto")
                .with_accessor("name", "String", true, true)
                .with_accessor("hasClaws", "Boolean", true, false),
        );
        GraphBuilder::new(&introspector).build("PreditorDto").unwrap()
    }

    fn ignore_paths(raws: &[&str]) -> Vec<IgnorePath> {
        raws.iter()
            .map(|raw| IgnorePath::parse(raw, SourceLocation::new(22, 9)))
            .collect()
    }

    #[test]
    fn test_vacuous_ignore_is_accepted_silently() {
        let graph = preditor_graph();
        let config = ResolverConfig::default();
        let sets = aggregate(&graph, graph.root(), &ignore_paths(&["hasClaws"]));

        let report = Validator::new(&graph, &config).validate(&sets, &[]);
        assert_eq!(report.outcomes, vec![IgnoreOutcome::Accepted]);
        assert!(report.diagnostics.is_empty());
        assert!(report.is_ok());
    }

    #[test]
    fn test_vacuous_ignore_warns_when_configured() {
        let graph = preditor_graph();
        let config = ResolverConfig::new().with_report_vacuous_ignores(true);
        let sets = aggregate(&graph, graph.root(), &ignore_paths(&["hasClaws"]));

        let report = Validator::new(&graph, &config).validate(&sets, &[]);
        assert_eq!(report.outcomes, vec![IgnoreOutcome::Accepted]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
        // a warning never blocks generation
        assert!(report.is_ok());
    }

    #[test]
    fn test_read_only_conflict_is_rejected() {
        let graph = preditor_graph();
        let config = ResolverConfig::default();
        let sets = aggregate(&graph, graph.root(), &ignore_paths(&["hasClaws"]));
        let manual = ignore_paths(&["hasClaws"]);

        let report = Validator::new(&graph, &config).validate(&sets, &manual);
        assert!(!report.is_ok());
        assert_eq!(report.errors().count(), 1);
        assert!(matches!(&report.outcomes[0], IgnoreOutcome::Rejected { .. }));
        assert_eq!(
            report.diagnostics[0].message,
            "Property \"hasClaws\" has no write accessor in PreditorDto."
        );
        assert_eq!(report.diagnostics[0].location, Some(SourceLocation::new(22, 9)));
    }

    #[test]
    fn test_manual_reference_to_writable_property_is_no_conflict() {
        let graph = preditor_graph();
        let config = ResolverConfig::default();
        let sets = aggregate(&graph, graph.root(), &ignore_paths(&["name"]));
        let manual = ignore_paths(&["name"]);

        let report = Validator::new(&graph, &config).validate(&sets, &manual);
        assert!(report.is_ok());
        assert_eq!(report.outcomes, vec![IgnoreOutcome::Accepted]);
    }

    #[test]
    fn test_path_failures_are_hard_errors() {
        let graph = preditor_graph();
        let config = ResolverConfig::default();
        let sets = aggregate(&graph, graph.root(), &ignore_paths(&["tail"]));

        let report = Validator::new(&graph, &config).validate(&sets, &[]);
        assert!(!report.is_ok());
        assert!(matches!(&report.outcomes[0], IgnoreOutcome::Failed { .. }));
        assert_eq!(
            report.diagnostics[0].message,
            "Unknown property \"tail\" referenced in ignore path at line 22, column 9."
        );
    }

    #[test]
    fn test_unresolvable_manual_references_are_skipped() {
        let graph = preditor_graph();
        let config = ResolverConfig::default();
        let sets = aggregate(&graph, graph.root(), &ignore_paths(&["hasClaws"]));
        let manual = ignore_paths(&["nonexistent"]);

        let report = Validator::new(&graph, &config).validate(&sets, &manual);
        assert!(report.is_ok());
    }
}
