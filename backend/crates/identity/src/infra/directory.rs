//! Static Admin Directory
//!
//! Admin user references and their security pins, loaded at startup. Pin
//! comparison is constant-time.

use std::collections::HashMap;

use platform::crypto::constant_time_eq;

use crate::domain::collaborator::AdminDirectory;
use crate::domain::value_object::UserRefId;
use crate::error::IdentityResult;

/// Admin directory backed by an in-process map
#[derive(Clone, Default)]
pub struct StaticAdminDirectory {
    pins: HashMap<UserRefId, String>,
}

impl StaticAdminDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an admin with their security pin
    pub fn with_admin(mut self, user_ref: UserRefId, pin: impl Into<String>) -> Self {
        self.pins.insert(user_ref, pin.into());
        self
    }
}

impl AdminDirectory for StaticAdminDirectory {
    async fn verify_pin(&self, user_ref: &UserRefId, pin: &str) -> IdentityResult<bool> {
        let Some(expected) = self.pins.get(user_ref) else {
            return Ok(false);
        };
        Ok(constant_time_eq(pin.as_bytes(), expected.as_bytes()))
    }
}
