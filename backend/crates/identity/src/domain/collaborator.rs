//! Collaborator Traits
//!
//! Ports to services the identity workflows depend on but do not own:
//! session token minting and the admin directory.

use crate::domain::value_object::UserRefId;
use crate::error::IdentityResult;

/// Session token issuer trait
///
/// Issues opaque bearer tokens bound to a user reference and verifies them
/// on authenticated requests. Verification failure is
/// `IdentityError::TokenInvalid`.
#[trait_variant::make(TokenIssuer: Send)]
pub trait LocalTokenIssuer {
    /// Mint a token for a signed-in user
    async fn issue(&self, user_ref: &UserRefId) -> IdentityResult<String>;

    /// Verify a presented token and recover the user reference
    async fn verify(&self, token: &str) -> IdentityResult<UserRefId>;
}

/// Admin directory trait
///
/// Answers whether a user reference belongs to an administrator with the
/// given security pin. A plain `false` (not an error) means the sign-in
/// workflow must reject with the same generic message as a wrong password.
#[trait_variant::make(AdminDirectory: Send)]
pub trait LocalAdminDirectory {
    /// Check the security pin for an admin user
    async fn verify_pin(&self, user_ref: &UserRefId, pin: &str) -> IdentityResult<bool>;
}
