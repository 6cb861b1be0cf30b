//! Admin Sign In Use Case
//!
//! Authenticates an administrator: username and password first, then the
//! security pin against the admin directory.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::sign_in_client::{SignInInput, SignInOutput};
use crate::domain::collaborator::{AdminDirectory, TokenIssuer};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::Username;
use crate::error::IdentityResult;

/// Admin sign in input
pub struct SignInAdminInput {
    /// Username and password
    pub credentials: SignInInput,
    /// Admin security pin
    pub security_pin: String,
}

/// Admin sign in use case
pub struct SignInAdminUseCase<R, T, D>
where
    R: CredentialRepository,
    T: TokenIssuer,
    D: AdminDirectory,
{
    credential_repo: Arc<R>,
    token_issuer: Arc<T>,
    directory: Arc<D>,
    config: Arc<IdentityConfig>,
}

impl<R, T, D> SignInAdminUseCase<R, T, D>
where
    R: CredentialRepository,
    T: TokenIssuer,
    D: AdminDirectory,
{
    pub fn new(
        credential_repo: Arc<R>,
        token_issuer: Arc<T>,
        directory: Arc<D>,
        config: Arc<IdentityConfig>,
    ) -> Self {
        Self {
            credential_repo,
            token_issuer,
            directory,
            config,
        }
    }

    pub async fn execute(&self, input: SignInAdminInput) -> IdentityResult<SignInOutput> {
        let Ok(username) = Username::new(input.credentials.username) else {
            return Ok(SignInOutput::rejected());
        };

        let Some(credential) = self.credential_repo.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "Admin sign-in for unknown username");
            return Ok(SignInOutput::rejected());
        };

        if !credential.verify_password(&input.credentials.password, self.config.pepper()) {
            tracing::warn!(username = %username, "Admin sign-in with wrong password");
            return Ok(SignInOutput::rejected());
        }

        // The pin check runs only after the password check passed, and a
        // wrong pin is indistinguishable from a wrong password to the caller.
        let pin_valid = self
            .directory
            .verify_pin(&credential.user_ref(), &input.security_pin)
            .await?;
        if !pin_valid {
            tracing::warn!(
                user_ref = %credential.user_ref(),
                "Admin sign-in with wrong security pin"
            );
            return Ok(SignInOutput::rejected());
        }

        let token = self.token_issuer.issue(&credential.user_ref()).await?;

        tracing::info!(
            credential_id = %credential.id(),
            user_ref = %credential.user_ref(),
            "Admin signed in"
        );

        Ok(SignInOutput {
            success: true,
            message: "Signed in".to_string(),
            credential_id: Some(credential.id().to_string()),
            user_ref: Some(credential.user_ref().to_string()),
            username: Some(credential.username().to_string()),
            token: Some(token),
        })
    }
}
