//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::{
    IdentityConfig, RegisterInput, RegisterUseCase, SignInAdminInput, SignInAdminUseCase,
    SignInClientUseCase, SignInInput, UpdateCredentialsInput, UpdateCredentialsUseCase,
};
use crate::domain::collaborator::{AdminDirectory, TokenIssuer};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::UserRefId;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{
    RegisterRequest, RegisterResponse, SignInAdminRequest, SignInClientRequest, SignInResponse,
    UpdateSecurityRequest, UpdateSecurityResponse,
};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R, T, D>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    T: TokenIssuer + Clone + Send + Sync + 'static,
    D: AdminDirectory + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub token_issuer: Arc<T>,
    pub directory: Arc<D>,
    pub config: Arc<IdentityConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R, T, D>(
    State(state): State<IdentityAppState<R, T, D>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    T: TokenIssuer + Clone + Send + Sync + 'static,
    D: AdminDirectory + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    // The profile record lives in another service; mint the reference the
    // credential will carry.
    let input = RegisterInput {
        username: req.username,
        password: req.password,
        user_ref: UserRefId::new(),
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            credential_id: output.credential_id,
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /sign-in/client
pub async fn sign_in_client<R, T, D>(
    State(state): State<IdentityAppState<R, T, D>>,
    Json(req): Json<SignInClientRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    T: TokenIssuer + Clone + Send + Sync + 'static,
    D: AdminDirectory + Clone + Send + Sync + 'static,
{
    let use_case = SignInClientUseCase::new(
        state.repo.clone(),
        state.token_issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(sign_in_response(output))
}

/// POST /sign-in/admin
pub async fn sign_in_admin<R, T, D>(
    State(state): State<IdentityAppState<R, T, D>>,
    Json(req): Json<SignInAdminRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    T: TokenIssuer + Clone + Send + Sync + 'static,
    D: AdminDirectory + Clone + Send + Sync + 'static,
{
    let use_case = SignInAdminUseCase::new(
        state.repo.clone(),
        state.token_issuer.clone(),
        state.directory.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInAdminInput {
            credentials: SignInInput {
                username: req.username,
                password: req.password,
            },
            security_pin: req.security_pin,
        })
        .await?;

    Ok(sign_in_response(output))
}

/// Rejections go out as 401, successes as 200, both with a full body
fn sign_in_response(output: crate::application::SignInOutput) -> impl IntoResponse {
    let status = if output.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(SignInResponse::from(output)))
}

// ============================================================================
// Update Security
// ============================================================================

/// PUT /update-security
pub async fn update_security<R, T, D>(
    State(state): State<IdentityAppState<R, T, D>>,
    headers: HeaderMap,
    Json(req): Json<UpdateSecurityRequest>,
) -> IdentityResult<Json<UpdateSecurityResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    T: TokenIssuer + Clone + Send + Sync + 'static,
    D: AdminDirectory + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(&headers)?;
    let user_ref = state.token_issuer.verify(&token).await?;

    let use_case = UpdateCredentialsUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(UpdateCredentialsInput {
            user_ref,
            current_password: req.current_password,
            new_username: req.new_username,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(UpdateSecurityResponse {
        success: true,
        username: output.username,
    }))
}

/// Pull the bearer token out of the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> IdentityResult<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(IdentityError::TokenInvalid)?;

    value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(IdentityError::TokenInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_or_malformed_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(IdentityError::TokenInvalid)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc.def"));
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(IdentityError::TokenInvalid)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(IdentityError::TokenInvalid)
        ));
    }
}
