//! Error types for shard recovery

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a descriptor or recovering its payload
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a descriptor
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Descriptor Errors
    // =========================================================================
    /// Descriptor is not valid JSON or lacks a required field
    #[error("Failed to parse descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// Number of shares does not match the declared total shard count
    #[error("Descriptor lists {found} shares but declares {expected} total shards")]
    ShareCountMismatch { expected: i64, found: usize },

    /// Descriptor fields violate the coding invariants
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameters { field: &'static str, reason: String },

    // =========================================================================
    // Recovery Errors
    // =========================================================================
    /// A present shard failed transport decoding or has the wrong length
    #[error("Corrupt shard {index}: {reason}")]
    CorruptShard { index: usize, reason: String },

    /// Insufficient shards for reconstruction
    #[error("Insufficient shards for reconstruction: have {available}, need {required}")]
    InsufficientShards { available: usize, required: usize },

    /// Reconstructed shards are not consistent with parity
    #[error("Parity verification failed after reconstruction")]
    ParityMismatch,

    /// Reed-Solomon reconstruction failed
    #[error("Reconstruction failed: {0}")]
    ReconstructionFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging subscriber could not be installed
    #[error("Telemetry initialization failed: {0}")]
    Telemetry(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    InvalidParameters,
    CorruptShard,
    InsufficientShards,
    Io,
    Internal,
}

impl Error {
    /// Map this error onto its kind.
    ///
    /// Transport-decode failures count as [`ErrorKind::CorruptShard`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Parse(_) | Error::ShareCountMismatch { .. } => ErrorKind::Parse,
            Error::InvalidParameters { .. } | Error::Config(_) => ErrorKind::InvalidParameters,
            Error::CorruptShard { .. } | Error::ParityMismatch => ErrorKind::CorruptShard,
            Error::InsufficientShards { .. } => ErrorKind::InsufficientShards,
            Error::ReconstructionFailed(_) | Error::Telemetry(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameters {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(index: usize, reason: impl Into<String>) -> Self {
        Error::CorruptShard {
            index,
            reason: reason.into(),
        }
    }
}
