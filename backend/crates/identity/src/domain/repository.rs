//! Repository Traits
//!
//! Interfaces for credential persistence. Implementations live in the
//! infrastructure layer.

use crate::domain::entity::Credential;
use crate::domain::value_object::{CredentialId, UserRefId, Username};
use crate::error::IdentityResult;

/// Credential repository trait
///
/// The store is the authority on username uniqueness: `add` and `update`
/// return `IdentityError::UsernameTaken` on a duplicate, regardless of any
/// earlier `exists_by_username` check.
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Persist a new credential
    async fn add(&self, credential: &Credential) -> IdentityResult<()>;

    /// Find a credential by its id
    async fn find_by_id(&self, id: &CredentialId) -> IdentityResult<Option<Credential>>;

    /// Find a credential by username
    async fn find_by_username(&self, username: &Username) -> IdentityResult<Option<Credential>>;

    /// Find the credential for a user reference
    async fn find_by_user_ref(&self, user_ref: &UserRefId) -> IdentityResult<Option<Credential>>;

    /// Check whether a username is already taken
    async fn exists_by_username(&self, username: &Username) -> IdentityResult<bool>;

    /// Persist changes to an existing credential
    async fn update(&self, credential: &Credential) -> IdentityResult<()>;

    /// Remove a credential
    async fn delete(&self, id: &CredentialId) -> IdentityResult<()>;
}
