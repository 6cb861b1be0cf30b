//! Username Value Object
//!
//! The username is the public login identifier for one identity.
//! Uniqueness is a store-level concern; this type only guards format.
//!
//! ## Invariants
//! - Non-blank (not empty, not whitespace-only)
//! - Length between 3 and 50 characters (Unicode chars, not bytes)
//! - Stored as given; no case folding or normalization is applied

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 50;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is empty or whitespace-only
    Blank,

    /// Username is too short
    TooShort { length: usize, min: usize },

    /// Username is too long
    TooLong { length: usize, max: usize },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "Username cannot be blank"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
        }
    }
}

impl std::error::Error for UsernameError {}

// ============================================================================
// Username Value Object
// ============================================================================

/// Validated username
///
/// # Invariants
/// - Non-blank
/// - Length between [`USERNAME_MIN_LENGTH`] and [`USERNAME_MAX_LENGTH`]
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input
    pub fn new(input: impl Into<String>) -> Result<Self, UsernameError> {
        let value = input.into();

        if value.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        let length = value.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_MIN_LENGTH,
            });
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        Ok(Self(value))
    }

    /// Create from database values (already validated at write time)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the username as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.0).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        let name = Username::new("alice").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_stored_as_given() {
        // No case folding, no trimming
        let name = Username::new("Alice.B").unwrap();
        assert_eq!(name.as_str(), "Alice.B");
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(Username::new(""), Err(UsernameError::Blank)));
    }

    #[test]
    fn test_whitespace_only_fails() {
        assert!(matches!(Username::new("    "), Err(UsernameError::Blank)));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Username::new("ab"),
            Err(UsernameError::TooShort { length: 2, min: 3 })
        ));
    }

    #[test]
    fn test_minimum_length() {
        assert!(Username::new("abc").is_ok());
    }

    #[test]
    fn test_maximum_length() {
        let input = "a".repeat(USERNAME_MAX_LENGTH);
        assert!(Username::new(input).is_ok());
    }

    #[test]
    fn test_too_long() {
        let input = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert!(matches!(
            Username::new(input),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 3 characters, 9 bytes
        assert!(Username::new("日本語").is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = Username::new("alice").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"alice\"");

        let back: Username = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<Username, _> = serde_json::from_str("\"ab\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display() {
        let err = UsernameError::TooShort { length: 2, min: 3 };
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('3'));
    }
}
