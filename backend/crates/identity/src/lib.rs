//! Identity (Credential Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and collaborator traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL store, token issuer, admin directory
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with username + password
//! - Client and admin sign-in (admin adds a security pin)
//! - Credential rotation (username and/or password) behind a bearer token
//!
//! ## Security Model
//! - Passwords hashed with salted Argon2id, PHC format
//! - All sign-in failures collapse into one generic rejection
//! - HMAC-signed bearer tokens; storage errors opaque to callers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::postgres::PgCredentialRepository;
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
