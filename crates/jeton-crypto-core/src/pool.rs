//! Ordered, duplicate-free character alphabets backing token generation.
//!
//! A [`CharacterPool`] is a flat ordered set of single-byte characters.
//! The same structure serves both directions of the token lifecycle:
//! position → character during generation, character → membership during
//! validation. A flat set (rather than a bitmask or contiguous range) keeps
//! sparse alphabets representable, e.g. recovery codes that drop the
//! visually ambiguous `0/O` and `1/I` pairs.

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Alphabets
// ---------------------------------------------------------------------------

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const HEX_LOWER: &str = "0123456789abcdef";
const HEX_UPPER: &str = "0123456789ABCDEF";

/// Consonants and digits only; no vowels, so no accidental words in filenames.
const FILENAME_SAFE: &str = "0123456789BCDFGHJKLMNPQRSTVWXYZ";

/// Recovery-code alphabet: no `0/O`, no `1/I`, no vowels.
const MFA_RECOVERY: &str = "23456789BCDFGHJKLMNPQRSTVWXYZ";

/// RFC 7636 §4.1 unreserved characters beyond the alphanumerics.
const PKCE_EXTRA: &str = "-_~.";

// ---------------------------------------------------------------------------
// CharacterPool
// ---------------------------------------------------------------------------

/// An ordered, duplicate-free set of single-byte characters.
///
/// Built once, sequentially, before first use; immutable in practice after
/// that (all read paths take `&self`). A pool of size 0 is constructible but
/// illegal to consume — the token construction path rejects it with
/// [`CryptoError::InvalidPoolConfiguration`].
///
/// Membership and duplicate checks are linear scans. Pools hold tens of
/// entries, and insertion order is semantically meaningful (position is the
/// sampling index), so a flat `Vec` is the right shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    entries: Vec<char>,
}

impl Default for CharacterPool {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterPool {
    /// Create an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a pool by appending every character of `alphabet` in order.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPoolEntry`] if any character is
    /// multi-byte in UTF-8 or appears more than once.
    pub fn from_alphabet(alphabet: &str) -> Result<Self, CryptoError> {
        let mut pool = Self::new();
        for ch in alphabet.chars() {
            pool.add_entry(ch)?;
        }
        Ok(pool)
    }

    /// Append one character to the pool.
    ///
    /// Comparison is case-sensitive: `'a'` and `'A'` are distinct entries.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPoolEntry`] if the character does not
    /// encode as a single byte (the pool model measures token lengths in
    /// one-byte code units, so multi-byte entries are not supported), or if
    /// it is already present.
    pub fn add_entry(&mut self, entry: char) -> Result<(), CryptoError> {
        if entry.len_utf8() != 1 {
            return Err(CryptoError::InvalidPoolEntry(format!(
                "multi-byte characters are not supported in the character pool, got '{entry}'"
            )));
        }

        if self.entries.contains(&entry) {
            return Err(CryptoError::InvalidPoolEntry(format!(
                "character '{entry}' already exists in the pool"
            )));
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Number of entries in the pool.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the pool has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries joined in insertion order.
    ///
    /// Used for diagnostic messages and alphabet listings in errors.
    #[must_use]
    pub fn as_concatenated_string(&self) -> String {
        self.entries.iter().collect()
    }

    /// Zero-based positional lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::IndexOutOfRange`] when `index` is outside
    /// `[0, size - 1]`.
    pub fn entry_at(&self, index: usize) -> Result<char, CryptoError> {
        self.entries.get(index).copied().ok_or_else(|| {
            CryptoError::IndexOutOfRange(format!(
                "position {index} outside of interval [0, {}]",
                self.entries.len().saturating_sub(1)
            ))
        })
    }

    /// Case-sensitive single-character membership test.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains(&ch)
    }

    /// `true` iff every character of `candidate` is present in the pool.
    ///
    /// The empty string is vacuously compatible.
    #[must_use]
    pub fn is_compatible(&self, candidate: &str) -> bool {
        candidate.chars().all(|ch| self.contains(ch))
    }

    // -- Named alphabets ----------------------------------------------------

    /// Decimal digits `0-9`.
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn digits() -> Self {
        Self::from_alphabet(DIGITS).expect("digit alphabet is duplicate-free ASCII")
    }

    /// Mixed-case alphanumerics: `0-9`, then `a-z`, then `A-Z`.
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn alphanumeric() -> Self {
        let mut pool = Self::new();
        for ch in DIGITS.chars().chain(LOWERCASE.chars()).chain(UPPERCASE.chars()) {
            pool.add_entry(ch)
                .expect("alphanumeric alphabet is duplicate-free ASCII");
        }
        pool
    }

    /// Lowercase hexadecimal `0-9a-f`.
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn hex_lower() -> Self {
        Self::from_alphabet(HEX_LOWER).expect("hex alphabet is duplicate-free ASCII")
    }

    /// Uppercase hexadecimal `0-9A-F`.
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn hex_upper() -> Self {
        Self::from_alphabet(HEX_UPPER).expect("hex alphabet is duplicate-free ASCII")
    }

    /// Filename-safe subset: digits plus uppercase consonants.
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn filename_safe() -> Self {
        Self::from_alphabet(FILENAME_SAFE).expect("filename alphabet is duplicate-free ASCII")
    }

    /// RFC 7636 PKCE code-verifier alphabet: mixed-case alphanumerics plus
    /// `-`, `_`, `~`, `.` (66 characters).
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn pkce() -> Self {
        let mut pool = Self::alphanumeric();
        for ch in PKCE_EXTRA.chars() {
            pool.add_entry(ch)
                .expect("PKCE extra characters are outside the alphanumerics");
        }
        pool
    }

    /// MFA recovery-code alphabet: digits and uppercase consonants with the
    /// visually ambiguous `0`, `1` dropped (29 characters).
    ///
    /// # Panics
    ///
    /// Never — the backing alphabet is a fixed duplicate-free ASCII string.
    #[must_use]
    pub fn mfa_recovery() -> Self {
        Self::from_alphabet(MFA_RECOVERY).expect("recovery alphabet is duplicate-free ASCII")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
