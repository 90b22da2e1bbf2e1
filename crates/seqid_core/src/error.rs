//! Error types for the counter service.

use thiserror::Error;

/// Result type for counter operations.
pub type CounterResult<T> = Result<T, CounterError>;

/// Errors that can occur in counter operations.
///
/// The allocation path has a single failure mode: [`StorageUnavailable`].
/// When it is returned, no counter mutation was applied and no ID was
/// produced - callers must fail the enclosing operation rather than
/// fabricate a substitute identifier. The remaining variants can only
/// surface while opening a store and replaying its allocation log.
///
/// [`StorageUnavailable`]: CounterError::StorageUnavailable
#[derive(Debug, Error)]
pub enum CounterError {
    /// The backing store could not durably apply a write.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] seqid_storage::StorageError),

    /// The allocation log is corrupted or invalid.
    #[error("allocation log corruption: {message}")]
    LogCorruption {
        /// Description of the corruption.
        message: String,
    },

    /// Checksum mismatch detected in the allocation log.
    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Expected checksum.
        expected: u32,
        /// Actual checksum.
        actual: u32,
    },

    /// The counter key is not usable.
    #[error("invalid counter key: {message}")]
    InvalidKey {
        /// Description of why the key was rejected.
        message: String,
    },
}

impl CounterError {
    /// Creates an allocation log corruption error.
    pub fn corruption(message: impl Into<String>) -> Self {
        Self::LogCorruption {
            message: message.into(),
        }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }
}
