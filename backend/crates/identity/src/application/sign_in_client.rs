//! Client Sign In Use Case
//!
//! Authenticates a client user by username and password and mints a
//! session token.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::collaborator::TokenIssuer;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::Username;
use crate::error::IdentityResult;

/// Generic rejection message for all sign-in failures
///
/// Unknown username, wrong password, and wrong pin all read the same, so a
/// caller cannot probe which usernames exist.
pub const SIGN_IN_REJECTED: &str = "Invalid username or password";

/// Sign in input
pub struct SignInInput {
    /// Username
    pub username: String,
    /// Cleartext password
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Whether authentication succeeded
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Credential id (on success)
    pub credential_id: Option<String>,
    /// User reference (on success)
    pub user_ref: Option<String>,
    /// Username as stored (on success)
    pub username: Option<String>,
    /// Bearer token (on success)
    pub token: Option<String>,
}

impl SignInOutput {
    /// Rejection with the generic message
    pub fn rejected() -> Self {
        Self {
            success: false,
            message: SIGN_IN_REJECTED.to_string(),
            credential_id: None,
            user_ref: None,
            username: None,
            token: None,
        }
    }
}

/// Client sign in use case
pub struct SignInClientUseCase<R, T>
where
    R: CredentialRepository,
    T: TokenIssuer,
{
    credential_repo: Arc<R>,
    token_issuer: Arc<T>,
    config: Arc<IdentityConfig>,
}

impl<R, T> SignInClientUseCase<R, T>
where
    R: CredentialRepository,
    T: TokenIssuer,
{
    pub fn new(credential_repo: Arc<R>, token_issuer: Arc<T>, config: Arc<IdentityConfig>) -> Self {
        Self {
            credential_repo,
            token_issuer,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> IdentityResult<SignInOutput> {
        // A name that cannot pass format validation cannot be stored either,
        // so it gets the same generic rejection as a wrong password.
        let Ok(username) = Username::new(input.username) else {
            return Ok(SignInOutput::rejected());
        };

        let Some(credential) = self.credential_repo.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "Sign-in for unknown username");
            return Ok(SignInOutput::rejected());
        };

        if !credential.verify_password(&input.password, self.config.pepper()) {
            tracing::warn!(username = %username, "Sign-in with wrong password");
            return Ok(SignInOutput::rejected());
        }

        let token = self.token_issuer.issue(&credential.user_ref()).await?;

        tracing::info!(
            credential_id = %credential.id(),
            user_ref = %credential.user_ref(),
            "Client signed in"
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
