//! Update Credentials Use Case
//!
//! Rotates the username and/or password of an authenticated user. Both
//! changes are gated on the current password and persisted as one write.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{RawPassword, UserRefId, Username};
use crate::error::{IdentityError, IdentityResult};

/// Update credentials input
pub struct UpdateCredentialsInput {
    /// User reference recovered from the bearer token
    pub user_ref: UserRefId,
    /// Current password (always required)
    pub current_password: String,
    /// New username, if renaming
    pub new_username: Option<String>,
    /// New password, if rotating
    pub new_password: Option<String>,
}

/// Update credentials output
pub struct UpdateCredentialsOutput {
    /// Username after the update
    pub username: String,
}

/// Update credentials use case
pub struct UpdateCredentialsUseCase<R>
where
    R: CredentialRepository,
{
    credential_repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> UpdateCredentialsUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(credential_repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self {
            credential_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: UpdateCredentialsInput,
    ) -> IdentityResult<UpdateCredentialsOutput> {
        // Validate the request shape before touching the store.
        if input.new_username.is_none() && input.new_password.is_none() {
            return Err(IdentityError::Validation("Nothing to update".to_string()));
        }

        let new_username = input
            .new_username
            .map(Username::new)
            .transpose()
            .map_err(|e| IdentityError::Validation(e.to_string()))?;
        let new_password = input.new_password.map(RawPassword::new).transpose()?;

        let mut credential = self
            .credential_repo
            .find_by_user_ref(&input.user_ref)
            .await?
            .ok_or(IdentityError::NotFound)?;

        if !credential.verify_password(&input.current_password, self.config.pepper()) {
            tracing::warn!(
                user_ref = %input.user_ref,
                "Credential update with wrong current password"
            );
            return Err(IdentityError::InvalidCredentials);
        }

        if let Some(username) = new_username {
            credential.rename(username);
        }
        if let Some(password) = &new_password {
            credential.change_password(&input.current_password, password, self.config.pepper())?;
        }

        // One write for both changes; a duplicate username surfaces here as
        // UsernameTaken from the store.
        self.credential_repo.update(&credential).await?;

        tracing::info!(
            credential_id = %credential.id(),
            user_ref = %credential.user_ref(),
            "Credentials updated"
        );

        Ok(UpdateCredentialsOutput {
            username: credential.username().to_string(),
        })
    }
}
