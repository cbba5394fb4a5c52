//! Ignore-path parsing

use serde::{Deserialize, Serialize};

/// Position of a declaration in its source unit, carried for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A dotted target-property reference, split into ordered segments.
///
/// A single-segment path names a direct target property; a multi-segment
/// path names a property nested inside a complex target property. Splitting
/// happens exactly on non-escaped `.` boundaries; `\.` keeps a literal dot
/// inside a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnorePath {
    /// The raw declaration text
    pub raw: String,
    /// Path segments in order; never empty as a list, though individual
    /// segments may be empty for malformed input like `a..b`
    pub segments: Vec<String>,
    /// Where the declaration appeared
    pub location: SourceLocation,
}

impl IgnorePath {
    /// Parse a raw dotted reference.
    ///
    /// Parsing itself never fails; malformed segments (empty names) fail
    /// later during resolution, which keeps every finding attached to the
    /// declaration's source location.
    pub fn parse(raw: &str, location: SourceLocation) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('.') => current.push('.'),
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => current.push('\\'),
                },
                '.' => segments.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        segments.push(current);

        Self {
            raw: raw.to_string(),
            segments,
            location,
        }
    }

    /// Whether the path names a direct property of the root target type
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }
}
