//! Credential Password Value Objects
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is the validated cleartext from user input (zeroized
//!   on drop, length policy enforced here).
//! - [`CredentialPassword`] is the stored one-way hash.

use std::fmt;

use platform::password::{ClearTextPassword, PasswordHash};

use crate::error::{IdentityError, IdentityResult};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (in characters)
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum password length (in characters)
pub const PASSWORD_MAX_LENGTH: usize = 100;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Validated cleartext password from user input
///
/// Memory is zeroized when dropped. Debug output is redacted.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// ## Validation Rules
    /// - Non-blank (not empty, not whitespace-only)
    /// - Length between [`PASSWORD_MIN_LENGTH`] and [`PASSWORD_MAX_LENGTH`]
    ///   characters
    pub fn new(raw: String) -> IdentityResult<Self> {
        let clear_text = ClearTextPassword::new(raw)
            .map_err(|_| IdentityError::Validation("Password cannot be blank".to_string()))?;

        let length = clear_text.char_count();
        if length < PASSWORD_MIN_LENGTH {
            return Err(IdentityError::Validation(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters (got {length})"
            )));
        }
        if length > PASSWORD_MAX_LENGTH {
            return Err(IdentityError::Validation(format!(
                "Password must be at most {PASSWORD_MAX_LENGTH} characters (got {length})"
            )));
        }

        Ok(Self(clear_text))
    }

    /// Access the inner cleartext
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Credential Password (Hashed, for storage)
// ============================================================================

/// Stored password hash for one credential
///
/// Wraps the Argon2id PHC string. Safe to persist; Debug/Display mask the
/// hash. Equality compares the stored representation only (structural
/// equality for tests, never a substitute for [`CredentialPassword::verify`]).
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPassword(PasswordHash);

impl CredentialPassword {
    /// Create from a raw password by hashing (fresh salt per call)
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> IdentityResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| IdentityError::Internal(format!("Password hashing failed: {e}")))?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> IdentityResult<Self> {
        let hashed = PasswordHash::from_phc_string(phc_string)
            .map_err(|_| IdentityError::Internal("Invalid password hash in store".to_string()))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a candidate cleartext against this hash
    ///
    /// Returns `false` (never errors) for a blank candidate or a
    /// non-matching secret.
    pub fn verify(&self, candidate: &str, pepper: Option<&[u8]>) -> bool {
        let Ok(clear_text) = ClearTextPassword::new(candidate.to_string()) else {
            return false;
        };
        self.0.verify(&clear_text, pepper)
    }
}

impl fmt::Debug for CredentialPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for CredentialPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================
