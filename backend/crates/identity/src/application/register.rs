//! Register Use Case
//!
//! Creates a credential for a new user.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{RawPassword, UserRefId, Username};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    /// Desired username
    pub username: String,
    /// Cleartext password
    pub password: String,
    /// Profile record the credential will belong to
    pub user_ref: UserRefId,
}

/// Register output
pub struct RegisterOutput {
    /// Id of the stored credential
    pub credential_id: String,
    /// User reference the credential is bound to
    pub user_ref: String,
    /// Stored username
    pub username: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: CredentialRepository,
{
    credential_repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(credential_repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self {
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<RegisterOutput> {
        let username = Username::new(input.username)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;
        let password = RawPassword::new(input.password)?;

        // Fast-fail on an obviously taken name. The unique index is still
        // the authority: a concurrent insert surfaces as UsernameTaken from
        // `add` below.
        if self.credential_repo.exists_by_username(&username).await? {
            return Err(IdentityError::UsernameTaken);
        }

        let credential = Credential::new(input.user_ref, username, &password, self.config.pepper())?;

        self.credential_repo.add(&credential).await?;

        tracing::info!(
            credential_id = %credential.id(),
            user_ref = %credential.user_ref(),
            "Credential registered"
        );

        Ok(RegisterOutput {
            credential_id: credential.id().to_string(),
            user_ref: credential.user_ref().to_string(),
            username: credential.username().to_string(),
        })
    }
}
