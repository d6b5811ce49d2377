//! EC Metadata Descriptor
//!
//! The descriptor carries the coding parameters of an erasure-coded payload
//! together with the transport-encoded shard payloads. It is plain data: the
//! only checks performed at parse time are structural, everything else is
//! deferred to [`Descriptor::validate`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

/// Largest shard count representable over GF(2^8).
pub const MAX_TOTAL_SHARDS: usize = 256;

// =============================================================================
// Descriptor
// =============================================================================

/// Serialized metadata for one erasure-coded payload
///
/// Integer fields are signed so that a descriptor with, say, `k = -1` still
/// parses and is rejected as an invalid parameter rather than as malformed
/// JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Number of data shards (k)
    #[serde(rename = "k")]
    pub data_shard_count: i64,

    /// Total number of shards including parity (m)
    #[serde(rename = "m")]
    pub total_shard_count: i64,

    /// Byte length of every shard
    pub shard_size: i64,

    /// Payload length before padding
    pub original_length: i64,

    /// Transport-encoded shard payloads; `None` or `""` marks a missing shard
    pub shares: Vec<Option<String>>,
}

impl Descriptor {
    /// Parse a descriptor from its JSON wire form.
    #[instrument(skip(raw), fields(raw_len = raw.len()))]
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let descriptor: Descriptor = serde_json::from_slice(raw)?;
        descriptor.check_share_count()?;

        debug!(
            k = descriptor.data_shard_count,
            m = descriptor.total_shard_count,
            shard_size = descriptor.shard_size,
            original_length = descriptor.original_length,
            "Parsed descriptor"
        );

        Ok(descriptor)
    }

    /// Read and parse a descriptor from any byte source.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::parse(&raw)
    }

    /// Read and parse a descriptor file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read(path)?;
        Self::parse(&raw)
    }

    /// Serialize back to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether the share at `index` is a hole.
    pub fn is_missing(&self, index: usize) -> bool {
        match self.shares.get(index) {
            Some(Some(share)) => share.is_empty(),
            _ => true,
        }
    }

    /// Indices of shares that are absent or empty.
    pub fn missing_indices(&self) -> Vec<usize> {
        (0..self.shares.len())
            .filter(|&i| self.is_missing(i))
            .collect()
    }

    /// Number of shares carrying a payload.
    pub fn present_count(&self) -> usize {
        self.shares.len() - self.missing_indices().len()
    }

    fn check_share_count(&self) -> Result<()> {
        let found = self.shares.len();
        if i64::try_from(found).ok() != Some(self.total_shard_count) {
            return Err(Error::ShareCountMismatch {
                expected: self.total_shard_count,
                found,
            });
        }
        Ok(())
    }

    /// Check the coding invariants and produce the unsigned parameter set.
    pub fn validate(&self) -> Result<CodingParams> {
        let k = self.data_shard_count;
        let m = self.total_shard_count;

        if k < 1 {
            return Err(Error::invalid("k", format!("must be at least 1, got {}", k)));
        }
        if m <= k {
            return Err(Error::invalid(
                "m",
                format!("must exceed k ({}) to provide parity, got {}", k, m),
            ));
        }
        if self.shard_size < 1 {
            return Err(Error::invalid(
                "shard_size",
                format!("must be at least 1, got {}", self.shard_size),
            ));
        }
        if self.original_length < 0 {
            return Err(Error::invalid(
                "original_length",
                format!("must not be negative, got {}", self.original_length),
            ));
        }

        let data_shards = to_usize("k", k)?;
        let total_shards = to_usize("m", m)?;
        if total_shards > MAX_TOTAL_SHARDS {
            return Err(Error::invalid(
                "m",
                format!(
                    "at most {} shards are supported, got {}",
                    MAX_TOTAL_SHARDS, total_shards
                ),
            ));
        }
        let shard_size = to_usize("shard_size", self.shard_size)?;
        let original_length = to_usize("original_length", self.original_length)?;

        let capacity = data_shards.checked_mul(shard_size).ok_or_else(|| {
            Error::invalid(
                "shard_size",
                format!("k * shard_size overflows ({} * {})", data_shards, shard_size),
            )
        })?;
        if original_length > capacity {
            return Err(Error::invalid(
                "original_length",
                format!(
                    "{} exceeds data capacity k * shard_size = {}",
                    original_length, capacity
                ),
            ));
        }

        self.check_share_count()?;

        Ok(CodingParams {
            data_shards,
            parity_shards: total_shards - data_shards,
            shard_size,
            original_length,
        })
    }
}

fn to_usize(field: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::invalid(field, format!("{} does not fit in memory", value)))
}

// =============================================================================
// Coding Parameters
// =============================================================================

/// Validated coding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingParams {
    pub data_shards: usize,
    pub parity_shards: usize,
    pub shard_size: usize,
    pub original_length: usize,
}

impl CodingParams {
    /// Get the total number of shards
    pub fn total_shards(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    /// Length of the concatenated data shards, padding included
    pub fn padded_length(&self) -> usize {
        self.data_shards * self.shard_size
    }
}

// =============================================================================
// Tests
// =============================================================================
