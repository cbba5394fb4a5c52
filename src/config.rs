//! Configuration for property resolution and plan building

use serde::{Deserialize, Serialize};

/// Configuration for the resolution engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How to report writable target properties that end up neither mapped
    /// nor explicitly ignored
    pub unmapped_target_policy: UnmappedTargetPolicy,
    /// Report ignores of write-less properties as warnings instead of
    /// accepting them silently
    pub report_vacuous_ignores: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            unmapped_target_policy: UnmappedTargetPolicy::Warn,
            report_vacuous_ignores: false,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strict config: unmapped target properties are hard errors
    /// and vacuous ignores are reported
    pub fn strict() -> Self {
        Self {
            unmapped_target_policy: UnmappedTargetPolicy::Error,
            report_vacuous_ignores: true,
        }
    }

    /// Set the unmapped-target reporting policy
    pub fn with_unmapped_target_policy(mut self, policy: UnmappedTargetPolicy) -> Self {
        self.unmapped_target_policy = policy;
        self
    }

    /// Enable/disable vacuous-ignore reporting
    pub fn with_report_vacuous_ignores(mut self, enabled: bool) -> Self {
        self.report_vacuous_ignores = enabled;
        self
    }
}

/// Reporting policy for unmapped target properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedTargetPolicy {
    /// Do not report unmapped target properties
    Ignore,
    /// Report unmapped target properties as warnings
    Warn,
    /// Treat unmapped target properties as hard errors
    Error,
}

impl Default for UnmappedTargetPolicy {
    fn default() -> Self {
        Self::Warn
    }
}

impl std::fmt::Display for UnmappedTargetPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnmappedTargetPolicy::Ignore => write!(f, "ignore"),
            UnmappedTargetPolicy::Warn => write!(f, "warn"),
            UnmappedTargetPolicy::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for UnmappedTargetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(UnmappedTargetPolicy::Ignore),
            "warn" | "warning" => Ok(UnmappedTargetPolicy::Warn),
            "error" => Ok(UnmappedTargetPolicy::Error),
            _ => Err(format!("Unknown unmapped-target policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.unmapped_target_policy, UnmappedTargetPolicy::Warn);
        assert!(!config.report_vacuous_ignores);
    }

    #[test]
    fn test_strict_config() {
        let config = ResolverConfig::strict();
        assert_eq!(config.unmapped_target_policy, UnmappedTargetPolicy::Error);
        assert!(config.report_vacuous_ignores);
    }

    #[test]
    fn test_builder() {
        let config = ResolverConfig::new()
            .with_unmapped_target_policy(UnmappedTargetPolicy::Ignore)
            .with_report_vacuous_ignores(true);

        assert_eq!(config.unmapped_target_policy, UnmappedTargetPolicy::Ignore);
        assert!(config.report_vacuous_ignores);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "warn".parse::<UnmappedTargetPolicy>().unwrap(),
            UnmappedTargetPolicy::Warn
        );
        assert_eq!(
            "warning".parse::<UnmappedTargetPolicy>().unwrap(),
            UnmappedTargetPolicy::Warn
        );
        assert_eq!(
            "ERROR".parse::<UnmappedTargetPolicy>().unwrap(),
            UnmappedTargetPolicy::Error
        );
        assert!("fatal".parse::<UnmappedTargetPolicy>().is_err());
    }
}
