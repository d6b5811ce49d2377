//! Shard Transport Encoding
//!
//! Shards travel inside the descriptor as text. This is the boundary where
//! that encoding is removed and shards become raw, fixed-size byte buffers.

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::general_purpose::{
    GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE,
};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Decoding accepts non-zero trailing bits in the last symbol.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Text-safe encoding used for shard payloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareEncoding {
    /// RFC 4648 base64, standard alphabet, padded
    #[default]
    Base64,
    /// RFC 4648 base64, URL-safe alphabet, padded
    Base64UrlSafe,
}

impl ShareEncoding {
    /// Decode one share into raw bytes.
    ///
    /// Line breaks (`\r`, `\n`) are skipped so MIME-wrapped shares decode,
    /// and the last symbol may carry non-zero trailing bits.
    pub fn decode(&self, share: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        let share = strip_line_breaks(share);
        match self {
            ShareEncoding::Base64 => STANDARD_LENIENT.decode(share.as_bytes()),
            ShareEncoding::Base64UrlSafe => URL_SAFE_LENIENT.decode(share.as_bytes()),
        }
    }

    /// Encode raw shard bytes.
    pub fn encode(&self, shard: &[u8]) -> String {
        match self {
            ShareEncoding::Base64 => STANDARD.encode(shard),
            ShareEncoding::Base64UrlSafe => URL_SAFE.encode(shard),
        }
    }
}

fn strip_line_breaks(share: &str) -> Cow<'_, str> {
    if share.contains(['\r', '\n']) {
        Cow::Owned(share.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(share)
    }
}

/// Turn the descriptor's shares into a shard set.
///
/// Absent and empty shares become holes. A present share that does not
/// decode, or decodes to anything but `shard_size` bytes, fails the whole
/// materialization. Short shards are never zero-padded.
pub fn materialize(
    shares: &[Option<String>],
    shard_size: usize,
    encoding: ShareEncoding,
) -> Result<Vec<Option<Vec<u8>>>> {
    shares
        .iter()
        .enumerate()
        .map(|(index, share)| materialize_one(index, share.as_deref(), shard_size, encoding))
        .collect()
}

fn materialize_one(
    index: usize,
    share: Option<&str>,
    shard_size: usize,
    encoding: ShareEncoding,
) -> Result<Option<Vec<u8>>> {
    let text = match share {
        None | Some("") => return Ok(None),
        Some(text) => text,
    };

    let bytes = encoding
        .decode(text)
        .map_err(|e| Error::corrupt(index, format!("transport decode failed: {}", e)))?;
    if bytes.len() != shard_size {
        return Err(Error::corrupt(
            index,
            format!("expected {} bytes, decoded {}", shard_size, bytes.len()),
        ));
    }

    Ok(Some(bytes))
}
