//! Data Transfer Objects
//!
//! Request and response shapes for the identity HTTP surface. Field names
//! are camelCase on the wire.

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Registration request
///
/// Profile fields (`display`, `email`, `icon`, `phrase`) are carried for the
/// profile service and not interpreted here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub display: Option<String>,
    pub email: Option<String>,
    pub icon: Option<String>,
    pub phrase: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub credential_id: String,
}

// ============================================================================
// Sign In
// ============================================================================

/// Client sign-in request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInClientRequest {
    pub username: String,
    pub password: String,
}

/// Admin sign-in request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInAdminRequest {
    pub username: String,
    pub password: String,
    pub security_pin: String,
}

/// Sign-in response (both client and admin)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<crate::application::SignInOutput> for SignInResponse {
    fn from(output: crate::application::SignInOutput) -> Self {
        Self {
            success: output.success,
            message: output.message,
            identity_id: output.credential_id,
            external_user_id: output.user_ref,
            username: output.username,
            token: output.token,
        }
    }
}

// ============================================================================
// Update Security
// ============================================================================

/// Credential rotation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecurityRequest {
    pub current_password: String,
    pub new_username: Option<String>,
    pub new_password: Option<String>,
}

/// Credential rotation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecurityResponse {
    pub success: bool,
    pub username: String,
}
