//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Password hashing (salted Argon2id, PHC format)

pub mod crypto;
pub mod password;
