//! Password hashing and one-way digests, delegated to vetted libraries.
//!
//! - [`hash_password`] / [`verify_password`] — Argon2id PHC strings via the
//!   `argon2` crate, interactive-use default cost parameters
//! - [`digest`] / [`digest_hex`] — SHA-256/SHA-512 via `ring`, BLAKE3 via
//!   `blake3`, CRC-32 via `crc32fast`
//!
//! Nothing here implements algorithm internals; this module only maps the
//! libraries' surfaces onto [`CryptoError`].

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use ring::digest as ring_digest;

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Password hashing
// ---------------------------------------------------------------------------

/// Hash a cleartext password into a self-describing salted PHC string.
///
/// Uses Argon2id with the `argon2` crate's default parameters (interactive
/// use). The salt is drawn fresh from the OS CSPRNG on every call, so two
/// hashes of the same password differ.
///
/// # Errors
///
/// Returns [`CryptoError::HashingUnavailable`] on any underlying failure.
pub fn hash_password(cleartext: &str) -> Result<String, CryptoError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(cleartext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CryptoError::HashingUnavailable(format!("argon2 hashing failed: {e}")))
}

/// Verify a cleartext password against a PHC hash string.
///
/// Comparison is constant-time inside the `argon2` crate. A malformed
/// `hash` is an error, not a `false` — callers must be able to tell a
/// wrong password apart from corrupted stored data.
///
/// # Errors
///
/// Returns [`CryptoError::HashingUnavailable`] if `hash` is not a parseable
/// PHC string or verification fails for any reason other than a password
/// mismatch.
pub fn verify_password(hash: &str, cleartext: &str) -> Result<bool, CryptoError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| CryptoError::HashingUnavailable(format!("malformed password hash: {e}")))?;

    match Argon2::default().verify_password(cleartext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CryptoError::HashingUnavailable(format!(
            "password verification failed: {e}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

/// Digest algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256 (32-byte output), via `ring`.
    Sha256,
    /// SHA-512 (64-byte output), via `ring`.
    Sha512,
    /// BLAKE3 (32-byte output), via `blake3`.
    Blake3,
    /// CRC-32 (4-byte big-endian output), via `crc32fast`. A checksum, not
    /// a cryptographic digest — integrity tagging only.
    Crc32,
}

impl DigestAlgorithm {
    /// Resolve an algorithm by name (case-insensitive).
    ///
    /// Recognized names: `sha256`, `sha512`, `blake3`, `crc32`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, CryptoError> {
        match name.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            "crc32" => Ok(Self::Crc32),
            other => Err(CryptoError::UnsupportedAlgorithm(format!(
                "unrecognized digest algorithm: '{other}'"
            ))),
        }
    }
}

/// Compute a one-way digest of `input`, returning raw bytes.
#[must_use]
pub fn digest(algorithm: DigestAlgorithm, input: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha256 => ring_digest::digest(&ring_digest::SHA256, input)
            .as_ref()
            .to_vec(),
        DigestAlgorithm::Sha512 => ring_digest::digest(&ring_digest::SHA512, input)
            .as_ref()
            .to_vec(),
        DigestAlgorithm::Blake3 => blake3::hash(input).as_bytes().to_vec(),
        DigestAlgorithm::Crc32 => {
            let mut hasher = crc32fast::Hasher::new();
            hasher.update(input);
            hasher.finalize().to_be_bytes().to_vec()
        }
    }
}

/// Compute a one-way digest of `input`, returning lowercase hex.
#[must_use]
pub fn digest_hex(algorithm: DigestAlgorithm, input: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for byte in digest(algorithm, input) {
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── Password hashing ───────────────────────────────────────────

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"), "not a PHC string: {hash}");
        assert!(verify_password(&hash, "correct horse battery staple").unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("right").unwrap();
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b, "salts must differ between calls");
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let err = verify_password("not-a-phc-string", "whatever").unwrap_err();
        assert!(matches!(err, CryptoError::HashingUnavailable(_)));
    }

    // ── Digest names ───────────────────────────────────────────────

    #[test]
    fn algorithm_names_resolve() {
        assert_eq!(
            DigestAlgorithm::from_name("sha256").unwrap(),
            DigestAlgorithm::Sha256
        );
        assert_eq!(
            DigestAlgorithm::from_name("SHA512").unwrap(),
            DigestAlgorithm::Sha512
        );
        assert_eq!(
            DigestAlgorithm::from_name("blake3").unwrap(),
            DigestAlgorithm::Blake3
        );
        assert_eq!(
            DigestAlgorithm::from_name("crc32").unwrap(),
            DigestAlgorithm::Crc32
        );
    }

    #[test]
    fn unknown_algorithm_rejected() {
        let err = DigestAlgorithm::from_name("md5").unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(_)));
        assert!(err.to_string().contains("'md5'"));
    }

    // ── Digest vectors ─────────────────────────────────────────────

    #[test]
    fn sha256_known_answer() {
        assert_eq!(
            digest_hex(DigestAlgorithm::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            digest_hex(DigestAlgorithm::Sha256, b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha512_known_answer() {
        assert_eq!(
            digest_hex(DigestAlgorithm::Sha512, b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn blake3_known_answer() {
        // Self-consistency against the blake3 crate's own output.
        let expected = blake3::hash(b"abc");
        assert_eq!(digest_hex(DigestAlgorithm::Blake3, b"abc"), expected.to_hex().as_str());
    }

    #[test]
    fn crc32_known_answer() {
        // CRC-32/ISO-HDLC check value for "123456789".
        assert_eq!(digest_hex(DigestAlgorithm::Crc32, b"123456789"), "cbf43926");
        assert_eq!(digest_hex(DigestAlgorithm::Crc32, b""), "00000000");
    }

    #[test]
    fn binary_and_hex_agree() {
        let raw = digest(DigestAlgorithm::Sha256, b"abc");
        assert_eq!(raw.len(), 32);
        let hex = digest_hex(DigestAlgorithm::Sha256, b"abc");
        assert_eq!(hex.len(), 64);
    }
}
