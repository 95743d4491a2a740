//! `jeton-crypto-core` — Character-pool token generation and hashing for JETON.
//!
//! Two independent utilities:
//! - [`pool`] / [`token`] — restricted-alphabet random tokens (hex strings,
//!   PKCE code verifiers, MFA recovery codes) generated or validated
//!   against a character pool and a length policy
//! - [`hash`] — Argon2id password hashing and one-way digests, thin
//!   delegation to vetted libraries
//!
//! This crate is the audit target: zero network, zero async, no persisted
//! state.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod pool;

pub mod token;

pub mod hash;

pub use error::CryptoError;
pub use hash::{digest, digest_hex, hash_password, verify_password, DigestAlgorithm};
pub use pool::CharacterPool;
pub use token::{
    generate_mfa_recovery_code, generate_pkce_verifier, validate_mfa_recovery_code,
    validate_pkce_verifier, CrypToken, LengthPolicy, MFA_RECOVERY_CODE_LENGTH, PKCE_MAX_LENGTH,
    PKCE_MIN_LENGTH,
};
