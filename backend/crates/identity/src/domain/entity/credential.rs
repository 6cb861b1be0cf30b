//! Credential Aggregate
//!
//! One credential record: the link between a user reference and the secrets
//! that authenticate it. All mutation goes through methods on this type so
//! the format invariants of [`Username`] and the one-way property of
//! [`CredentialPassword`] hold for every instance.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    CredentialId, CredentialPassword, RawPassword, UserRefId, Username,
};
use crate::error::{IdentityError, IdentityResult};

/// Credential aggregate root
#[derive(Debug, Clone)]
pub struct Credential {
    id: CredentialId,
    user_ref: UserRefId,
    username: Username,
    password: CredentialPassword,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential, hashing the password
    ///
    /// The id is minted here; the store persists it as-is.
    pub fn new(
        user_ref: UserRefId,
        username: Username,
        password: &RawPassword,
        pepper: Option<&[u8]>,
    ) -> IdentityResult<Self> {
        let now = Utc::now();

        Ok(Self {
            id: CredentialId::new(),
            user_ref,
            username,
            password: CredentialPassword::from_raw(password, pepper)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from stored values (no re-validation, no re-hashing)
    pub fn from_db(
        id: CredentialId,
        user_ref: UserRefId,
        username: Username,
        password: CredentialPassword,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_ref,
            username,
            password,
            created_at,
            updated_at,
        }
    }

    /// Check a candidate cleartext against the stored hash
    ///
    /// Returns `false` for any non-matching or blank candidate; never errors.
    pub fn verify_password(&self, candidate: &str, pepper: Option<&[u8]>) -> bool {
        self.password.verify(candidate, pepper)
    }

    /// Replace the username
    ///
    /// Format validation happened when `username` was constructed;
    /// uniqueness is checked by the store at write time.
    pub fn rename(&mut self, username: Username) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Replace the password, gated on the current one
    ///
    /// On a wrong `current` the stored hash is untouched and
    /// [`IdentityError::InvalidCredentials`] is returned.
    pub fn change_password(
        &mut self,
        current: &str,
        new_password: &RawPassword,
        pepper: Option<&[u8]>,
    ) -> IdentityResult<()> {
        if !self.verify_password(current, pepper) {
            return Err(IdentityError::InvalidCredentials);
        }

        self.password = CredentialPassword::from_raw(new_password, pepper)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> CredentialId {
        self.id
    }

    pub fn user_ref(&self) -> UserRefId {
        self.user_ref
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &CredentialPassword {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
