//! Error types for color transfer operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chromashift operations.
pub type Result<T> = std::result::Result<T, TransferError>;

/// Which side of a transfer a statistics record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatisticsRole {
    /// The image whose colors are adopted.
    Source,
    /// The image being recolored.
    Target,
}

impl fmt::Display for StatisticsRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Errors raised by the statistics extractor and the channel recolorer.
///
/// Every error is terminal to the operation that raised it; no partial
/// result is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    /// The image or channel data is empty, misshapen, or holds non-finite samples.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A standard deviation used as a divisor is zero.
    #[error(
        "degenerate statistics: {role} channel {channel} has zero standard deviation ({stdev:e})"
    )]
    DegenerateStatistics {
        channel: usize,
        role: StatisticsRole,
        stdev: f64,
    },
}

impl TransferError {
    /// Create an invalid-input error from any displayable reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_message_names_role_and_channel() {
        let err = TransferError::DegenerateStatistics {
            channel: 2,
            role: StatisticsRole::Source,
            stdev: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("source channel 2"), "unexpected message: {msg}");
    }

    #[test]
    fn test_invalid_input_helper() {
        let err = TransferError::invalid_input("empty image");
        assert_eq!(err.to_string(), "invalid input: empty image");
    }
}
