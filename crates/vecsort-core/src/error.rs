//! Error types for the core crate.
//!
//! Only segment storage can fail in a recoverable way; a broken tour
//! invariant is a bug and panics instead of producing an error.

use thiserror::Error;

use crate::geometry::Pass;

/// Errors that can occur while adding segments to a [`SegmentSet`](crate::SegmentSet).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentSetError {
    /// Storage for another segment could not be obtained.
    #[error("Storage exhausted for {pass} pass after {stored} segments")]
    StorageExhausted {
        /// The pass whose set was full.
        pass: Pass,
        /// Number of segments already stored.
        stored: usize,
    },
}

/// Result type alias for segment storage operations.
pub type SegmentSetResult<T> = Result<T, SegmentSetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_exhausted_display() {
        let err = SegmentSetError::StorageExhausted {
            pass: Pass::Red,
            stored: 12,
        };
        assert_eq!(
            err.to_string(),
            "Storage exhausted for red pass after 12 segments"
        );
    }
}
