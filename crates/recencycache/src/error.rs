//! Error types for recencycache

use std::fmt;

/// Result type alias for recencycache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
///
/// Only construction can fail. Touching, peeking and snapshotting are total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache configuration rejected (capacity must be at least 1)
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration("capacity must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be at least 1"
        );
    }
}
