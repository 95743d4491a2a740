//! Crypto-token generation and validation over a character pool.
//!
//! A [`CrypToken`] binds a token string to the [`CharacterPool`] it was
//! drawn from and the [`LengthPolicy`] it satisfies. One shared construction
//! path ([`CrypToken::generate`] / [`CrypToken::from_string`]) runs both
//! length policies:
//!
//! 1. reject an empty pool;
//! 2. validate the length policy itself, generation or not;
//! 3. without an input string, generate with unbiased draws from `OsRng`;
//! 4. with an input string, check length then alphabet, and keep the
//!    string unchanged.
//!
//! Pool and policy errors are raised before any length or compatibility
//! error: a caller handing a string to a misconfigured token type sees the
//! configuration error, not a complaint about the string.

use rand::RngCore;

use crate::error::CryptoError;
use crate::pool::CharacterPool;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum PKCE code-verifier length (RFC 7636 §4.1).
pub const PKCE_MIN_LENGTH: usize = 43;

/// Maximum PKCE code-verifier length (RFC 7636 §4.1).
pub const PKCE_MAX_LENGTH: usize = 128;

/// Length of an MFA recovery code over the recovery alphabet.
pub const MFA_RECOVERY_CODE_LENGTH: usize = 10;

// ---------------------------------------------------------------------------
// Length policy
// ---------------------------------------------------------------------------

/// Token length policy: one exact length, or an inclusive range.
///
/// A range with `min == max` is rejected on purpose — callers wanting one
/// exact length must use [`LengthPolicy::Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPolicy {
    /// The token has exactly this length, in one-byte characters.
    Fixed(usize),
    /// The token length lies in `[min, max]` inclusive. When generating,
    /// the effective length is drawn uniformly from the range.
    Range {
        /// Inclusive lower bound, at least 1.
        min: usize,
        /// Inclusive upper bound, strictly greater than `min`.
        max: usize,
    },
}

impl LengthPolicy {
    /// Validate the policy configuration itself.
    ///
    /// This runs unconditionally during token construction, even on the
    /// generation path: a malformed policy must never silently produce a
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLengthConfiguration`] if:
    /// - `Fixed(len)` with `len < 1`
    /// - `Range` with `min == max` (use `Fixed` instead)
    /// - `Range` with `min > max`
    /// - `Range` with `min < 1`
    pub fn validate(&self) -> Result<(), CryptoError> {
        match *self {
            Self::Fixed(len) => {
                if len < 1 {
                    return Err(CryptoError::InvalidLengthConfiguration(format!(
                        "token length must be in [1, {}], but requested {len}",
                        usize::MAX
                    )));
                }
                Ok(())
            }
            Self::Range { min, max } => {
                if min == max {
                    return Err(CryptoError::InvalidLengthConfiguration(format!(
                        "min and max lengths are both {min}; use a fixed-length policy for an exact length"
                    )));
                }
                if min > max {
                    return Err(CryptoError::InvalidLengthConfiguration(format!(
                        "length range not properly defined: min {min} chars, max {max} chars"
                    )));
                }
                if min < 1 {
                    return Err(CryptoError::InvalidLengthConfiguration(format!(
                        "minimum length must be at least 1, got {min}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Check a supplied token string against this policy.
    ///
    /// Lengths are measured in one-byte characters; the pool model already
    /// forbids multi-byte entries, so byte length and character count agree.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::LengthMismatch`] reporting the requirement,
    /// the actual length, and the offending string.
    pub fn check(&self, candidate: &str) -> Result<(), CryptoError> {
        let actual = candidate.len();
        match *self {
            Self::Fixed(len) => {
                if actual != len {
                    return Err(CryptoError::LengthMismatch(format!(
                        "this token is required to be {len} chars long, but got {actual}: '{candidate}'"
                    )));
                }
                Ok(())
            }
            Self::Range { min, max } => {
                if actual < min || actual > max {
                    return Err(CryptoError::LengthMismatch(format!(
                        "token length out of specs: {actual} chars, required [{min}, {max}] chars"
                    )));
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CrypToken
// ---------------------------------------------------------------------------

/// An immutable token string bound to the pool and length policy it
/// satisfies.
///
/// Every character of the value belongs to the pool and the length
/// satisfies the policy, for the object's whole lifetime — a `CrypToken`
/// only exists if construction fully succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrypToken {
    value: String,
    pool: CharacterPool,
    policy: LengthPolicy,
}

impl CrypToken {
    /// Generate a new random token over `pool` satisfying `policy`.
    ///
    /// Each character is drawn independently and uniformly from the pool
    /// using the OS CSPRNG. For a [`LengthPolicy::Range`], the effective
    /// length is first drawn uniformly from `[min, max]`, independently of
    /// the character draws.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidPoolConfiguration`] if the pool is empty
    /// - [`CryptoError::InvalidLengthConfiguration`] if the policy is malformed
    /// - [`CryptoError::RandomSourceUnavailable`] if the OS random source
    ///   fails; generation is never retried with a weaker source
    pub fn generate(pool: CharacterPool, policy: LengthPolicy) -> Result<Self, CryptoError> {
        build(pool, policy, None)
    }

    /// Validate `candidate` against `pool` and `policy`, keeping the string
    /// unchanged as the token value on success.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidPoolConfiguration`] if the pool is empty
    /// - [`CryptoError::InvalidLengthConfiguration`] if the policy is
    ///   malformed (checked before looking at `candidate`)
    /// - [`CryptoError::LengthMismatch`] if the length check fails
    /// - [`CryptoError::IncompatibleAlphabet`] if any character of
    ///   `candidate` is outside the pool
    pub fn from_string(
        pool: CharacterPool,
        policy: LengthPolicy,
        candidate: &str,
    ) -> Result<Self, CryptoError> {
        build(pool, policy, Some(candidate))
    }

    /// The token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the token, returning the owned value.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }

    /// Effective token length in one-byte characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Always `false` — both policies require a length of at least 1.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The character pool this token is bound to.
    #[must_use]
    pub const fn pool(&self) -> &CharacterPool {
        &self.pool
    }

    /// The length policy this token satisfies.
    #[must_use]
    pub const fn policy(&self) -> LengthPolicy {
        self.policy
    }
}

// ---------------------------------------------------------------------------
// Shared construction path
// ---------------------------------------------------------------------------

fn build(
    pool: CharacterPool,
    policy: LengthPolicy,
    input: Option<&str>,
) -> Result<CrypToken, CryptoError> {
    // Pool and policy errors come first, whether or not a string was supplied.
    if pool.is_empty() {
        return Err(CryptoError::InvalidPoolConfiguration(
            "character pool is empty; at least one entry is required".to_owned(),
        ));
    }
    policy.validate()?;

    let value = match input {
        None => generate_value(&pool, policy)?,
        Some(candidate) => {
            policy.check(candidate)?;
            if !pool.is_compatible(candidate) {
                return Err(CryptoError::IncompatibleAlphabet(format!(
                    "this token contains characters outside the allowed character pool; \
                     make sure it only contains characters from this list: '{}', given: '{candidate}'",
                    pool.as_concatenated_string()
                )));
            }
            candidate.to_owned()
        }
    };

    Ok(CrypToken {
        value,
        pool,
        policy,
    })
}

fn generate_value(pool: &CharacterPool, policy: LengthPolicy) -> Result<String, CryptoError> {
    let mut rng = rand::rngs::OsRng;

    let length = match policy {
        LengthPolicy::Fixed(len) => len,
        LengthPolicy::Range { min, max } => {
            let span = max.saturating_sub(min).saturating_add(1);
            min.saturating_add(secure_index(&mut rng, span)?)
        }
    };

    let mut value = String::with_capacity(length);
    for _ in 0..length {
        let index = secure_index(&mut rng, pool.size())?;
        value.push(pool.entry_at(index)?);
    }

    Ok(value)
}

/// Draw a uniformly distributed index in `[0, span)` from the OS CSPRNG.
///
/// Rejection-sampled: 64-bit draws at or above the largest multiple of
/// `span` would over-represent the low residues, so they are discarded and
/// redrawn. The final `% span` is then exactly uniform for any span, not
/// just powers of two.
///
/// # Errors
///
/// Returns [`CryptoError::RandomSourceUnavailable`] if the OS random source
/// fails. The draw is never retried against a weaker source.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn secure_index(rng: &mut rand::rngs::OsRng, span: usize) -> Result<usize, CryptoError> {
    if span == 0 {
        return Err(CryptoError::InvalidPoolConfiguration(
            "cannot draw from an empty range".to_owned(),
        ));
    }

    let span = span as u64;
    // Largest multiple of `span` representable in 64 bits.
    let zone = span * (u64::MAX / span);

    loop {
        let mut buf = [0u8; 8];
        rng.try_fill_bytes(&mut buf).map_err(|e| {
            CryptoError::RandomSourceUnavailable(format!("OS random source failed: {e}"))
        })?;

        let draw = u64::from_le_bytes(buf);
        if draw < zone {
            // draw % span < span <= usize::MAX, so the cast is lossless.
            return Ok((draw % span) as usize);
        }
    }
}

// ---------------------------------------------------------------------------
// Concrete tokens
// ---------------------------------------------------------------------------

/// Generate a PKCE code verifier: 43 to 128 characters over the RFC 7636
/// unreserved alphabet.
///
/// # Errors
///
/// Returns [`CryptoError::RandomSourceUnavailable`] if the OS random source
/// fails.
pub fn generate_pkce_verifier() -> Result<CrypToken, CryptoError> {
    CrypToken::generate(
        CharacterPool::pkce(),
        LengthPolicy::Range {
            min: PKCE_MIN_LENGTH,
            max: PKCE_MAX_LENGTH,
        },
    )
}

/// Validate a caller-supplied PKCE code verifier.
///
/// # Errors
///
/// Returns [`CryptoError::LengthMismatch`] or
/// [`CryptoError::IncompatibleAlphabet`] if `candidate` is not a valid
/// RFC 7636 code verifier.
pub fn validate_pkce_verifier(candidate: &str) -> Result<CrypToken, CryptoError> {
    CrypToken::from_string(
        CharacterPool::pkce(),
        LengthPolicy::Range {
            min: PKCE_MIN_LENGTH,
            max: PKCE_MAX_LENGTH,
        },
        candidate,
    )
}

/// Generate an MFA recovery code: 10 characters over the ambiguity-free
/// recovery alphabet.
///
/// # Errors
///
/// Returns [`CryptoError::RandomSourceUnavailable`] if the OS random source
/// fails.
pub fn generate_mfa_recovery_code() -> Result<CrypToken, CryptoError> {
    CrypToken::generate(
        CharacterPool::mfa_recovery(),
        LengthPolicy::Fixed(MFA_RECOVERY_CODE_LENGTH),
    )
}

/// Validate a caller-supplied MFA recovery code.
///
/// # Errors
///
/// Returns [`CryptoError::LengthMismatch`] or
/// [`CryptoError::IncompatibleAlphabet`] if `candidate` is not a valid
/// recovery code.
pub fn validate_mfa_recovery_code(candidate: &str) -> Result<CrypToken, CryptoError> {
    CrypToken::from_string(
        CharacterPool::mfa_recovery(),
        LengthPolicy::Fixed(MFA_RECOVERY_CODE_LENGTH),
        candidate,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
