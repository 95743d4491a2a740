//! Cryptographic error types for `jeton-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// All variants are local validation failures surfaced synchronously at
/// construction time. Nothing is retried or recovered internally, and a
/// partially constructed pool or token is never observable.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A pool entry is not a single one-byte character, or is already present.
    #[error("invalid pool entry: {0}")]
    InvalidPoolEntry(String),

    /// The character pool cannot back token generation (empty pool).
    #[error("invalid pool configuration: {0}")]
    InvalidPoolConfiguration(String),

    /// The length policy itself is malformed (zero/negative length, bad range).
    #[error("invalid length configuration: {0}")]
    InvalidLengthConfiguration(String),

    /// A supplied token string does not satisfy the length policy.
    #[error("length mismatch: {0}")]
    LengthMismatch(String),

    /// A supplied token string contains characters outside the bound pool.
    #[error("incompatible alphabet: {0}")]
    IncompatibleAlphabet(String),

    /// The OS cryptographically secure random source failed.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// Positional pool lookup outside `[0, size - 1]`.
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// Password hashing or verification failed in the underlying library.
    #[error("hashing unavailable: {0}")]
    HashingUnavailable(String),

    /// A digest algorithm name is not recognized.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
