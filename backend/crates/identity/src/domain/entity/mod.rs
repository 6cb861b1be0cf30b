//! Entities for the identity domain

pub mod credential;

pub use credential::Credential;
