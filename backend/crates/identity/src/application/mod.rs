//! Application layer for the identity crate
//!
//! Use cases orchestrate domain objects, the credential store, and the
//! collaborator ports. One struct per workflow, `execute` as the entry point.

pub mod config;
pub mod register;
pub mod sign_in_admin;
pub mod sign_in_client;
pub mod update_credentials;

pub use config::IdentityConfig;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use sign_in_admin::{SignInAdminInput, SignInAdminUseCase};
pub use sign_in_client::{SignInClientUseCase, SignInInput, SignInOutput, SIGN_IN_REJECTED};
pub use update_credentials::{
    UpdateCredentialsInput, UpdateCredentialsOutput, UpdateCredentialsUseCase,
};
