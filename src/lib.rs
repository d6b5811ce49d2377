//! shardmend - Erasure-Coded Payload Recovery
//!
//! Recovers an original byte stream from Reed-Solomon (k, m) shards described
//! by a JSON metadata descriptor. Any `m - k` shards may be missing; the
//! engine rebuilds the data shards over GF(2^8), concatenates them and strips
//! the encode-time padding.
//!
//! # Pipeline
//!
//! ```text
//! Descriptor (parse) → validate → materialize → reconstruct → assemble
//! ```
//!
//! # Modules
//!
//! - [`ec`] - Descriptor model, shard transport decoding and the recovery engine
//! - [`error`] - Error types
//! - [`telemetry`] - Logging subscriber setup

pub mod ec;
pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use ec::{Descriptor, Recovery, RecoveryConfig, RecoveryEngine, ShareEncoding};
pub use error::{Error, ErrorKind, Result};
pub use telemetry::{init_logging, LogConfig};

/// Parse `raw` as a descriptor and recover its payload with default settings.
pub fn recover(raw: &[u8]) -> Result<Vec<u8>> {
    let descriptor = Descriptor::parse(raw)?;
    RecoveryEngine::default().recover(&descriptor)
}
