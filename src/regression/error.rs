use std::path::PathBuf;

use thiserror::Error;

/// Result type for fitting and persistence operations.
pub type Result<T> = std::result::Result<T, FitError>;

/// Coarse classification of a [`FitError`], independent of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed caller input (negative degree, empty path, bad matrix shape).
    InvalidArgument,
    /// X and Y have different lengths.
    InvalidState,
    /// Too few points for the requested fit.
    InsufficientData,
    /// The linear system has no stable unique solution.
    Degenerate,
    /// The referenced file does not exist.
    NotFound,
    /// Persisted data is malformed.
    Parse,
    /// Underlying I/O failure.
    Io,
}

/// Errors raised by the regression calculator and its persistence layer.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Length mismatch: x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Insufficient data for {context}: need at least {required} points, got {actual}")]
    InsufficientData {
        required: usize,
        actual: usize,
        context: String,
    },

    #[error("Degenerate system: {0}")]
    Degenerate(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Parse error for key '{key}': '{token}' is not a number (expected e.g. '1.23;4.56')")]
    InvalidNumber { key: String, token: String },

    #[error("X/Y count mismatch: X has {x_len} values, Y has {y_len}")]
    CountMismatch { x_len: usize, y_len: usize },

    #[error("Missing '{0}' column")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FitError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            FitError::LengthMismatch { .. } => ErrorKind::InvalidState,
            FitError::InsufficientData { .. } => ErrorKind::InsufficientData,
            FitError::Degenerate(_) => ErrorKind::Degenerate,
            FitError::NotFound(_) => ErrorKind::NotFound,
            FitError::InvalidNumber { .. }
            | FitError::CountMismatch { .. }
            | FitError::MissingColumn(_)
            | FitError::Csv(_) => ErrorKind::Parse,
            FitError::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = FitError::InsufficientData {
            required: 4,
            actual: 3,
            context: "polynomial fit of degree 3".into(),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data for polynomial fit of degree 3: need at least 4 points, got 3"
        );

        let err = FitError::InvalidNumber {
            key: "X".into(),
            token: "abc".into(),
        };
        assert!(err.to_string().contains("'X'"));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            FitError::LengthMismatch { x_len: 1, y_len: 2 }.kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            FitError::CountMismatch { x_len: 3, y_len: 2 }.kind(),
            ErrorKind::Parse
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(FitError::from(io).kind(), ErrorKind::Io);
    }
}
