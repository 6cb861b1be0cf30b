//! Application Configuration
//!
//! Configuration for the identity application layer.

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Secret key for HMAC-signing session tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            password_pepper: None,
        }
    }
}

impl IdentityConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
