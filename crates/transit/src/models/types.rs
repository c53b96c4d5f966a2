//! Core data types and errors for the transit graph.

use crate::identifiers::*;

/// Travel or wait time attached to a directed edge.
///
/// Unsigned so a negative weight can never reach the router.
pub type Minutes = u32;

// ============================================================================
// Data Structures
// ============================================================================

/// A single outgoing edge of a station
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub to: StationIdentifier,
    pub minutes: Minutes,
}

impl Connection {
    pub fn new(to: StationIdentifier, minutes: Minutes) -> Self {
        Self { to, minutes }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// No station matched the given display name or identifier.
    #[error("Station not found: {0}")]
    StationNotFound(String),

    /// Both stations exist but the target is unreachable over directed edges.
    #[error("No path exists from {start} to {end}")]
    NoPathExists { start: String, end: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[cfg(feature = "loader")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransitError {
    /// Query failures are recoverable: the caller can move on to the next query.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::StationNotFound(_) | Self::NoPathExists { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TransitError::StationNotFound("D".into());
        assert_eq!(err.to_string(), "Station not found: D");

        let err = TransitError::NoPathExists {
            start: "A".into(),
            end: "Z".into(),
        };
        assert_eq!(err.to_string(), "No path exists from A to Z");
    }

    #[test]
    fn test_query_error_classification() {
        assert!(TransitError::StationNotFound("X".into()).is_query_error());
        assert!(TransitError::NoPathExists {
            start: "A".into(),
            end: "B".into()
        }
        .is_query_error());
        assert!(!TransitError::InvalidData("empty id".into()).is_query_error());
    }
}
