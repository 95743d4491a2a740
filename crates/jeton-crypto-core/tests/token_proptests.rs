#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for character-pool token construction.

use jeton_crypto_core::pool::CharacterPool;
use jeton_crypto_core::token::{CrypToken, LengthPolicy};
use proptest::prelude::*;

/// Every character a generated pool may contain.
const MASTER: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_~.";

/// Non-empty pool over an arbitrary subset of the master alphabet.
fn arb_pool() -> impl Strategy<Value = CharacterPool> {
    proptest::sample::subsequence(MASTER.chars().collect::<Vec<_>>(), 1..MASTER.len()).prop_map(
        |chars| {
            let mut pool = CharacterPool::new();
            for ch in chars {
                pool.add_entry(ch).unwrap();
            }
            pool
        },
    )
}

proptest! {
    /// Fixed-length generation yields exactly `len` characters, all from the pool.
    #[test]
    fn fixed_generation_length_and_alphabet(pool in arb_pool(), len in 1usize..64) {
        let token = CrypToken::generate(pool, LengthPolicy::Fixed(len)).unwrap();
        prop_assert_eq!(token.len(), len);
        prop_assert!(token.as_str().chars().all(|c| token.pool().contains(c)));
    }

    /// Variable-length generation stays within `[min, max]` inclusive.
    #[test]
    fn range_generation_within_bounds(pool in arb_pool(), min in 1usize..32, delta in 1usize..32) {
        let max = min + delta;
        let token = CrypToken::generate(pool, LengthPolicy::Range { min, max }).unwrap();
        prop_assert!((min..=max).contains(&token.len()));
        prop_assert!(token.as_str().chars().all(|c| token.pool().contains(c)));
    }

    /// A string that already satisfies a (pool, policy) pair validates
    /// unchanged — no normalization of any kind.
    #[test]
    fn validation_is_idempotent(pool in arb_pool(), len in 1usize..64) {
        let generated = CrypToken::generate(pool.clone(), LengthPolicy::Fixed(len)).unwrap();
        let validated =
            CrypToken::from_string(pool, LengthPolicy::Fixed(len), generated.as_str()).unwrap();
        prop_assert_eq!(validated.as_str(), generated.as_str());
    }

    /// A candidate containing only characters outside the pool never validates.
    #[test]
    fn foreign_chars_always_rejected(len in 1usize..32) {
        let candidate = "!".repeat(len);
        let result =
            CrypToken::from_string(CharacterPool::digits(), LengthPolicy::Fixed(len), &candidate);
        prop_assert!(result.is_err());
    }
}
