//! Infrastructure layer for the identity crate

pub mod directory;
pub mod memory;
pub mod postgres;
pub mod token;

pub use directory::StaticAdminDirectory;
pub use memory::MemoryCredentialRepository;
pub use postgres::PgCredentialRepository;
pub use token::HmacTokenIssuer;
