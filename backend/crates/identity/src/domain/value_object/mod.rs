//! Value Objects for the identity domain

pub mod credential_password;
pub mod ids;
pub mod username;

pub use credential_password::{CredentialPassword, RawPassword};
pub use ids::{CredentialId, UserRefId};
pub use username::Username;
