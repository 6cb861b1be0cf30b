//! Identity Router

use axum::{
    Router,
    routing::{post, put},
};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::collaborator::{AdminDirectory, TokenIssuer};
use crate::domain::repository::CredentialRepository;
use crate::infra::{HmacTokenIssuer, PgCredentialRepository, StaticAdminDirectory};
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the identity router with the PostgreSQL repository
///
/// The binary nests this under `/api/v1/authentication`.
pub fn identity_router(
    repo: PgCredentialRepository,
    directory: StaticAdminDirectory,
    config: IdentityConfig,
) -> Router {
    let token_issuer = HmacTokenIssuer::new(config.token_secret);
    identity_router_generic(repo, token_issuer, directory, config)
}

/// Create an identity router for any repository and collaborator set
pub fn identity_router_generic<R, T, D>(
    repo: R,
    token_issuer: T,
    directory: D,
    config: IdentityConfig,
) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
    T: TokenIssuer + Clone + Send + Sync + 'static,
    D: AdminDirectory + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        token_issuer: Arc::new(token_issuer),
        directory: Arc::new(directory),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, T, D>))
        .route("/sign-in/client", post(handlers::sign_in_client::<R, T, D>))
        .route("/sign-in/admin", post(handlers::sign_in_admin::<R, T, D>))
        .route("/update-security", put(handlers::update_security::<R, T, D>))
        .with_state(state)
}
