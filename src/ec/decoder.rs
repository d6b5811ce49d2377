//! Erasure Coding Decoder
//!
//! Wraps the `reed-solomon-erasure` GF(2^8) codec for the recovery side:
//! reconstructing missing shards from survivors and checking parity.

use crate::error::{Error, Result};
use reed_solomon_erasure::galois_8::ReedSolomon;
use tracing::{debug, instrument};

/// Erasure coding decoder for reconstructing missing shards
pub struct EcDecoder {
    /// Reed-Solomon codec instance
    rs: ReedSolomon,
    /// Number of data shards (k)
    data_shards: usize,
    /// Number of parity shards (m - k)
    parity_shards: usize,
}

impl std::fmt::Debug for EcDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcDecoder")
            .field("data_shards", &self.data_shards)
            .field("parity_shards", &self.parity_shards)
            .finish()
    }
}

impl EcDecoder {
    /// Create a new decoder with the specified k + (m - k) configuration
    pub fn new(data_shards: usize, parity_shards: usize) -> Result<Self> {
        if data_shards == 0 {
            return Err(Error::invalid("k", "data_shards must be greater than 0"));
        }
        if parity_shards == 0 {
            return Err(Error::invalid("m", "parity_shards must be greater than 0"));
        }

        let rs = ReedSolomon::new(data_shards, parity_shards).map_err(|e| {
            Error::invalid("m", format!("Failed to create Reed-Solomon codec: {}", e))
        })?;

        Ok(Self {
            rs,
            data_shards,
            parity_shards,
        })
    }

    /// Get the number of data shards
    pub fn data_shards(&self) -> usize {
        self.data_shards
    }

    /// Get the number of parity shards
    pub fn parity_shards(&self) -> usize {
        self.parity_shards
    }

    /// Get the total number of shards
    pub fn total_shards(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    fn check_shard_set(&self, shards: &[Option<Vec<u8>>]) -> Result<usize> {
        if shards.len() != self.total_shards() {
            return Err(Error::ReconstructionFailed(format!(
                "Expected {} shards, got {}",
                self.total_shards(),
                shards.len()
            )));
        }

        let available = shards.iter().filter(|s| s.is_some()).count();
        if available < self.data_shards {
            return Err(Error::InsufficientShards {
                available,
                required: self.data_shards,
            });
        }
        Ok(available)
    }

    /// Reconstruct every missing shard, data and parity alike
    #[instrument(skip(self, shards))]
    pub fn reconstruct(&self, shards: &mut [Option<Vec<u8>>]) -> Result<()> {
        let available = self.check_shard_set(shards)?;

        self.rs.reconstruct(shards).map_err(|e| {
            Error::ReconstructionFailed(format!("Reed-Solomon reconstruction failed: {}", e))
        })?;

        debug!(
            "Reconstructed shards from {}/{} available",
            available,
            self.total_shards()
        );

        Ok(())
    }

    /// Reconstruct only the data shards, leaving missing parity as holes
    #[instrument(skip(self, shards))]
    pub fn reconstruct_data(&self, shards: &mut [Option<Vec<u8>>]) -> Result<()> {
        let available = self.check_shard_set(shards)?;

        self.rs.reconstruct_data(shards).map_err(|e| {
            Error::ReconstructionFailed(format!(
                "Reed-Solomon data reconstruction failed: {}",
                e
            ))
        })?;

        debug!(
            "Reconstructed data shards from {}/{} available",
            available,
            self.total_shards()
        );

        Ok(())
    }

    /// Verify that the parity shards are consistent with the data shards
    ///
    /// Every shard must be present; run [`EcDecoder::reconstruct`] first.
    pub fn verify(&self, shards: &[Option<Vec<u8>>]) -> Result<bool> {
        let complete: Vec<&[u8]> = shards
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.as_deref().ok_or_else(|| {
                    Error::ReconstructionFailed(format!("shard {} missing during verification", i))
                })
            })
            .collect::<Result<_>>()?;

        self.rs
            .verify(&complete)
            .map_err(|e| Error::ReconstructionFailed(format!("Verification failed: {}", e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
