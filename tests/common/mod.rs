//! Shared fixtures: an encoder producing descriptors the engine can recover.

#![allow(dead_code)]

use reed_solomon_erasure::galois_8::ReedSolomon;
use serde_json::json;
use shardmend::{Descriptor, ShareEncoding};

/// Deterministic, non-repeating-looking payload.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 7919) % 256) as u8 ^ 0xa5).collect()
}

/// Encode `data` into `m` shards of `shard_size` (first `k` systematic).
pub fn encode_shards(data: &[u8], k: usize, m: usize, shard_size: usize) -> Vec<Vec<u8>> {
    assert!(data.len() <= k * shard_size, "payload does not fit");
    let mut padded = data.to_vec();
    padded.resize(shard_size * m, 0);
    let mut shards: Vec<Vec<u8>> = padded.chunks(shard_size).map(|c| c.to_vec()).collect();
    ReedSolomon::new(k, m - k)
        .expect("valid coding parameters")
        .encode(&mut shards)
        .expect("encode");
    shards
}

/// JSON descriptor text with the shards listed in `missing` set to null.
pub fn descriptor_json(
    data: &[u8],
    k: usize,
    m: usize,
    shard_size: usize,
    missing: &[usize],
    encoding: ShareEncoding,
) -> String {
    let shares: Vec<Option<String>> = encode_shards(data, k, m, shard_size)
        .iter()
        .enumerate()
        .map(|(i, s)| (!missing.contains(&i)).then(|| encoding.encode(s)))
        .collect();

    json!({
        "k": k,
        "m": m,
        "shard_size": shard_size,
        "original_length": data.len(),
        "shares": shares,
    })
    .to_string()
}

/// Parsed descriptor with base64 shares.
pub fn descriptor(
    data: &[u8],
    k: usize,
    m: usize,
    shard_size: usize,
    missing: &[usize],
) -> Descriptor {
    let raw = descriptor_json(data, k, m, shard_size, missing, ShareEncoding::Base64);
    Descriptor::parse(raw.as_bytes()).expect("fixture descriptor parses")
}
