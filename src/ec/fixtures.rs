//! Descriptor fixtures for unit and property tests

use crate::ec::metadata::Descriptor;
use crate::ec::transport::ShareEncoding;
use reed_solomon_erasure::galois_8::ReedSolomon;

/// Split `data` into `k` zero-padded shards of `shard_size`, add `m - k`
/// parity shards, and package them as a descriptor with `missing` blanked.
pub(crate) fn encode_descriptor(
    data: &[u8],
    k: usize,
    m: usize,
    shard_size: usize,
    missing: &[usize],
) -> Descriptor {
    let mut padded = data.to_vec();
    padded.resize(shard_size * m, 0);
    let mut shards: Vec<Vec<u8>> = padded.chunks(shard_size).map(|c| c.to_vec()).collect();
    ReedSolomon::new(k, m - k)
        .unwrap()
        .encode(&mut shards)
        .unwrap();

    Descriptor {
        data_shard_count: k as i64,
        total_shard_count: m as i64,
        shard_size: shard_size as i64,
        original_length: data.len() as i64,
        shares: shards
            .iter()
            .enumerate()
            .map(|(i, s)| (!missing.contains(&i)).then(|| ShareEncoding::Base64.encode(s)))
            .collect(),
    }
}
