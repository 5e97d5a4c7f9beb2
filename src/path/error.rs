//! Error types for path resolution.

use std::fmt;

/// A segment could not be applied to the kind of node it reached.
///
/// A missing key or an index past the end of a sequence is not an error;
/// resolution reports those as not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Segments remained after reaching a scalar leaf.
    UnsupportedType {
        segment: String,
        position: usize,
        kind: &'static str,
    },
    /// A non-numeric segment was applied to a sequence.
    NonNumericIndex { segment: String, position: usize },
}

impl ResolveError {
    /// Returns the text of the segment that failed.
    pub fn segment(&self) -> &str {
        match self {
            ResolveError::UnsupportedType { segment, .. }
            | ResolveError::NonNumericIndex { segment, .. } => segment,
        }
    }

    /// Returns the 0-based position of the failing segment in the path.
    pub fn position(&self) -> usize {
        match self {
            ResolveError::UnsupportedType { position, .. }
            | ResolveError::NonNumericIndex { position, .. } => *position,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnsupportedType { segment, kind, .. } => {
                write!(f, "resolve: path {}, unsupported type {}", segment, kind)
            }
            ResolveError::NonNumericIndex { segment, .. } => write!(
                f,
                "resolve: path {}, cannot index a sequence with a non-numeric segment",
                segment
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
