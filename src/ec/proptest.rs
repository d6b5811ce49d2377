//! Property-Based Tests for Recovery
//!
//! Uses proptest to check the recovery engine across payload sizes, coding
//! parameters and hole patterns.
//!
//! # Test Properties
//!
//! 1. **Roundtrip**: any payload with at most m - k holes recovers exactly
//! 2. **Exact-k**: any k survivors give the same bytes as all m
//! 3. **Insufficiency**: fewer than k survivors always fail
//! 4. **Truncation**: output length is always `original_length`
//! 5. **Idempotence**: recovering twice yields identical bytes

#![cfg(test)]

use proptest::prelude::*;

use super::fixtures::encode_descriptor;
use super::reconstruction::RecoveryEngine;
use crate::error::Error;

// =============================================================================
// Property Strategies
// =============================================================================

/// Strategy for (k, m) with 1..=6 data shards and 1..=4 parity shards.
fn coding_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=6, 1usize..=4).prop_map(|(k, p)| (k, k + p))
}

/// Strategy for payload bytes.
fn data_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2000)
}

/// Shard size large enough for `len` bytes over `k` shards, plus slack.
fn shard_size_for(len: usize, k: usize, slack: usize) -> usize {
    len.div_ceil(k).max(1) + slack
}

/// Pick `count` distinct indices below `total` from a shuffled seed.
fn pick_holes(total: usize, count: usize, seed: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..total).collect();
    for (i, s) in seed.iter().enumerate().take(total) {
        order.swap(i, s % total);
    }
    let mut holes: Vec<usize> = order.into_iter().take(count).collect();
    holes.sort_unstable();
    holes
}

// =============================================================================
// Roundtrip Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: up to m - k holes anywhere still recover the payload.
    #[test]
    fn prop_roundtrip_with_holes(
        (k, m) in coding_strategy(),
        data in data_strategy(),
        slack in 0usize..16,
        hole_count in 0usize..=4,
        seed in prop::collection::vec(any::<usize>(), 10),
    ) {
        let shard_size = shard_size_for(data.len(), k, slack);
        let holes = pick_holes(m, hole_count.min(m - k), &seed);
        let descriptor = encode_descriptor(&data, k, m, shard_size, &holes);

        let recovered = RecoveryEngine::default().recover(&descriptor)?;

        prop_assert_eq!(recovered.len(), data.len());
        prop_assert_eq!(recovered, data, "k={}, m={}, holes={:?}", k, m, holes);
    }

    /// Property: exactly k survivors match a recovery with all m present.
    #[test]
    fn prop_exact_k_matches_full_set(
        (k, m) in coding_strategy(),
        data in prop::collection::vec(any::<u8>(), 1..1000),
        seed in prop::collection::vec(any::<usize>(), 10),
    ) {
        let shard_size = shard_size_for(data.len(), k, 0);
        let engine = RecoveryEngine::default();

        let full = engine.recover(&encode_descriptor(&data, k, m, shard_size, &[]))?;
        let holes = pick_holes(m, m - k, &seed);
        let minimal = engine.recover(&encode_descriptor(&data, k, m, shard_size, &holes))?;

        prop_assert_eq!(&minimal, &full, "holes={:?}", holes);
        prop_assert_eq!(minimal, data);
    }

    /// Property: recovery of one descriptor is deterministic.
    #[test]
    fn prop_recovery_idempotent(
        (k, m) in coding_strategy(),
        data in data_strategy(),
        seed in prop::collection::vec(any::<usize>(), 10),
    ) {
        let shard_size = shard_size_for(data.len(), k, 3);
        let holes = pick_holes(m, m - k, &seed);
        let descriptor = encode_descriptor(&data, k, m, shard_size, &holes);
        let engine = RecoveryEngine::default();

        let first = engine.recover(&descriptor)?;
        let second = engine.recover(&descriptor)?;
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Failure Mode Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: fewer than k survivors always fail with InsufficientShards.
    #[test]
    fn prop_too_many_holes_fails(
        (k, m) in coding_strategy(),
        data in prop::collection::vec(any::<u8>(), 1..500),
        extra in 1usize..=6,
        seed in prop::collection::vec(any::<usize>(), 10),
    ) {
        let shard_size = shard_size_for(data.len(), k, 0);
        let hole_count = (m - k + extra).min(m);
        let holes = pick_holes(m, hole_count, &seed);
        let descriptor = encode_descriptor(&data, k, m, shard_size, &holes);

        let result = RecoveryEngine::default().recover(&descriptor);

        let is_insufficient = matches!(
            result,
            Err(Error::InsufficientShards { available, required })
                if available == m - hole_count && required == k
        );
        prop_assert!(is_insufficient, "holes={:?} gave {:?}", holes, result);
    }
}
