//! Erasure Coding Recovery Module
//!
//! Recovers an original payload from a metadata descriptor whose shards were
//! produced by a systematic Reed-Solomon (k, m) code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          Recovery Pipeline                           │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  raw bytes ──▶ ┌────────────┐     ┌──────────────────────────────┐   │
//! │                │ Descriptor │────▶│       Recovery Engine         │   │
//! │                │  (parse)   │     │ validate → materialize →      │   │
//! │                └────────────┘     │ reconstruct → assemble        │   │
//! │                                   └──────────────┬───────────────┘   │
//! │                                                  │                   │
//! │                          ┌───────────────────────┴──────────┐        │
//! │                          │ Transport codec │ EcDecoder (RS) │        │
//! │                          └──────────────────────────────────┘        │
//! │                                                                      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - **Metadata** (`metadata.rs`): the [`Descriptor`] wire model and its
//!   validation into [`CodingParams`].
//! - **Transport** (`transport.rs`): base64 share decoding into a shard set.
//! - **Decoder** (`decoder.rs`): Reed-Solomon reconstruction over GF(2^8)
//!   using the `reed-solomon-erasure` crate.
//! - **Reconstruction** (`reconstruction.rs`): the [`RecoveryEngine`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use shardmend::ec::{Descriptor, RecoveryEngine};
//!
//! let descriptor = Descriptor::from_path("erasure_code.json")?;
//! let payload = RecoveryEngine::default().recover(&descriptor)?;
//! ```

pub mod decoder;
pub mod metadata;
pub mod reconstruction;
pub mod transport;

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod proptest;

pub use decoder::EcDecoder;
pub use metadata::{CodingParams, Descriptor, MAX_TOTAL_SHARDS};
pub use reconstruction::{Recovery, RecoveryConfig, RecoveryEngine};
pub use transport::ShareEncoding;
