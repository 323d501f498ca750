//! Error types for weft-core.
//!
//! Recoverable failures (validating user-supplied storage, configuration,
//! locale targeting) surface as [`Error`]. Contract violations on the index
//! algebra itself (out-of-range ordinals, mutating a rectangular domain)
//! abort via panics instead, since they indicate a bug in the caller.

/// Result type alias for weft-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in weft-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Array storage length does not match the domain it should cover.
    #[error("storage size mismatch: domain has {expected} indices, got {actual} elements")]
    StorageSizeMismatch { expected: i64, actual: i64 },

    /// Nested initializer rows disagree on their length.
    #[error("ragged initializer: row {row} has {actual} elements, expected {expected}")]
    RaggedInitializer {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// An environment variable carried an unusable value.
    #[error("invalid configuration: {name}={value:?}")]
    Config { name: &'static str, value: String },

    /// A locale id outside the runtime's locale space.
    #[error("unknown locale id {id}")]
    UnknownLocale { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::StorageSizeMismatch {
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "storage size mismatch: domain has 16 indices, got 12 elements"
        );

        let err = Error::UnknownLocale { id: 7 };
        assert_eq!(err.to_string(), "unknown locale id 7");
    }
}
