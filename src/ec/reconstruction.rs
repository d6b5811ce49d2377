//! Recovery Engine
//!
//! Turns a descriptor into the original payload: validate parameters,
//! materialize shards, run Reed-Solomon reconstruction, reassemble the data
//! shards and strip the padding. Every step fails fast; a failed recovery
//! never yields partial bytes.

use crate::ec::decoder::EcDecoder;
use crate::ec::metadata::{CodingParams, Descriptor};
use crate::ec::transport::{materialize, ShareEncoding};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the recovery engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Text encoding of the descriptor's shares
    pub share_encoding: ShareEncoding,

    /// Rebuild parity too and check it against the data shards
    pub verify_parity: bool,

    /// Upper bound on `k * shard_size`
    pub max_payload_bytes: Option<usize>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            share_encoding: ShareEncoding::Base64,
            verify_parity: false,
            max_payload_bytes: None,
        }
    }
}

impl RecoveryConfig {
    /// Load a configuration from a YAML document; absent keys take defaults.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }
}

// =============================================================================
// Recovery Result
// =============================================================================

/// Result of a recovery
#[derive(Debug, Clone)]
pub struct Recovery {
    /// The original payload
    pub payload: Vec<u8>,

    /// Whether any shard was missing
    pub degraded: bool,

    /// Indices of shards rebuilt by the codec
    pub reconstructed: Vec<usize>,

    /// Duration of the operation
    pub duration: Duration,
}

// =============================================================================
// Recovery Engine
// =============================================================================

/// Stateless engine recovering payloads from descriptors
///
/// Holds configuration only; each call owns its shard set, so one engine can
/// serve concurrent recoveries from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct RecoveryEngine {
    config: RecoveryConfig,
}

impl RecoveryEngine {
    /// Create a new recovery engine
    pub fn new(config: RecoveryConfig) -> Self {
        Self { config }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Recover the original payload bytes
    pub fn recover(&self, descriptor: &Descriptor) -> Result<Vec<u8>> {
        self.recover_with_report(descriptor).map(|r| r.payload)
    }

    /// Recover the original payload along with what had to be rebuilt
    #[instrument(
        skip(self, descriptor),
        fields(
            k = descriptor.data_shard_count,
            m = descriptor.total_shard_count,
            shard_size = descriptor.shard_size,
            original_length = descriptor.original_length
        )
    )]
    pub fn recover_with_report(&self, descriptor: &Descriptor) -> Result<Recovery> {
        let start = Instant::now();

        let params = self.validate(descriptor)?;

        let mut shards = materialize(
            &descriptor.shares,
            params.shard_size,
            self.config.share_encoding,
        )?;

        let missing = descriptor.missing_indices();
        debug!(
            present = descriptor.present_count(),
            missing = ?missing,
            "Materialized shards"
        );

        let reconstructed = self.reconstruct(&params, &mut shards, &missing)?;
        let payload = assemble(&params, &shards)?;

        let degraded = !missing.is_empty();
        if degraded {
            warn!(
                "Recovered payload with {} of {} shards missing",
                missing.len(),
                params.total_shards()
            );
        }
        info!(
            "Recovered {} bytes from {}+{} shards",
            payload.len(),
            params.data_shards,
            params.parity_shards
        );

        Ok(Recovery {
            payload,
            degraded,
            reconstructed,
            duration: start.elapsed(),
        })
    }

    fn validate(&self, descriptor: &Descriptor) -> Result<CodingParams> {
        let params = descriptor.validate()?;

        if let Some(max) = self.config.max_payload_bytes {
            if params.padded_length() > max {
                return Err(Error::invalid(
                    "shard_size",
                    format!(
                        "k * shard_size = {} exceeds the configured limit of {} bytes",
                        params.padded_length(),
                        max
                    ),
                ));
            }
        }

        Ok(params)
    }

    /// Fill the holes the output depends on; returns the rebuilt indices.
    fn reconstruct(
        &self,
        params: &CodingParams,
        shards: &mut [Option<Vec<u8>>],
        missing: &[usize],
    ) -> Result<Vec<usize>> {
        let available = shards.len() - missing.len();
        if available < params.data_shards {
            return Err(Error::InsufficientShards {
                available,
                required: params.data_shards,
            });
        }

        let data_missing = missing.iter().any(|&i| i < params.data_shards);
        if !data_missing && !self.config.verify_parity {
            return Ok(Vec::new());
        }

        let decoder = EcDecoder::new(params.data_shards, params.parity_shards)?;

        if self.config.verify_parity {
            decoder.reconstruct(shards)?;
            if !decoder.verify(shards)? {
                return Err(Error::ParityMismatch);
            }
            return Ok(missing.to_vec());
        }

        decoder.reconstruct_data(shards)?;
        Ok(missing
            .iter()
            .copied()
            .filter(|&i| i < params.data_shards)
            .collect())
    }
}

/// Concatenate the data shards in index order and strip the padding.
fn assemble(params: &CodingParams, shards: &[Option<Vec<u8>>]) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(params.padded_length());
    for (index, shard) in shards.iter().take(params.data_shards).enumerate() {
        let shard = shard.as_deref().ok_or_else(|| {
            Error::ReconstructionFailed(format!("data shard {} still missing", index))
        })?;
        data.extend_from_slice(shard);
    }

    data.truncate(params.original_length);
    Ok(data)
}

// =============================================================================
// Tests
// =============================================================================
