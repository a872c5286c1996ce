//! Password Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison (delegated to `argon2`)
//! - Optional application-wide pepper
//!
//! The policy in [`ClearTextPassword::new`] applies when a password is
//! chosen. Verification through [`matches`] only normalizes, so existing
//! accounts can always log in with what they registered.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized = normalize(&raw);

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // NIST: count Unicode code points, not bytes
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters other than space, tab, newline
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(&normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(Self((*normalized).clone()))
    }

    /// Create without validation (for testing or trusted input)
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = with_pepper(self.as_bytes(), pepper);

        // 128-bit random salt
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
        let hash = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters, salt and hash,
/// so verification needs nothing but this value and the pepper.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    fn verify_bytes(&self, password: &[u8], pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let password_bytes = with_pepper(password, pepper);

        // Argon2 uses constant-time comparison internally
        Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Credential comparison
// ============================================================================

/// Compare a plaintext password against an optional stored hash.
///
/// Returns `false` when there is no stored hash (federated-only account),
/// when the hash is unparsable, or when the password does not match.
/// Never fails.
pub fn matches(plain: &str, stored: Option<&HashedPassword>, pepper: Option<&[u8]>) -> bool {
    let Some(stored) = stored else {
        return false;
    };

    let normalized = normalize(plain);
    stored.verify_bytes(normalized.as_bytes(), pepper)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// NIST: Unicode NFKC normalization before processing
fn normalize(raw: &str) -> Zeroizing<String> {
    Zeroizing::new(raw.nfkc().collect())
}

fn with_pepper(password: &[u8], pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
    let mut combined = password.to_vec();
    if let Some(p) = pepper {
        combined.extend_from_slice(p);
    }
    Zeroizing::new(combined)
}

/// Check for common weak patterns
fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // All the same character (e.g., "aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &[
        "qwerty",
        "asdfgh",
        "zxcvbn",
        "qazwsx",
        "1qaz2wsx",
    ];

    if KEYBOARD_PATTERNS.iter().any(|pattern| lower.contains(pattern)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
        "checkin123",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// Check if string is only sequential digits (e.g., "12345678", "98765432")
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 4 {
        return false;
    }

    let is_ascending = digits
        .windows(2)
        .all(|w| w[1] == w[0] + 1 || (w[0] == 9 && w[1] == 0));

    let is_descending = digits
        .windows(2)
        .all(|w| w[0] == w[1] + 1 || (w[0] == 0 && w[1] == 9));

    is_ascending || is_descending
}

// ============================================================================
// Tests
// ============================================================================
