//! Identifier Value Objects
//!
//! Typed identifiers built on `kernel::id::Id`. The phantom marker keeps a
//! credential id and a user reference from being mixed up at compile time.

use kernel::id::Id;

/// Marker for credential identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialMarker;

/// Marker for user reference identifiers
///
/// The user reference points at the profile record owned by another part of
/// the system. The identity store never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserRefMarker;

/// Identifier of one credential aggregate
pub type CredentialId = Id<CredentialMarker>;

/// Opaque reference to the user profile a credential belongs to
pub type UserRefId = Id<UserRefMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(CredentialId::new(), CredentialId::new());
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = UserRefId::new();
        let parsed = UserRefId::parse_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }
}
