//! HMAC Token Issuer
//!
//! Bearer tokens of the form `<user_ref>.<signature>` where the signature
//! is HMAC-SHA256 over the user reference, Base64url-encoded. Stateless:
//! verification recomputes the signature instead of hitting a store.

use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

use crate::domain::collaborator::TokenIssuer;
use crate::domain::value_object::UserRefId;
use crate::error::{IdentityError, IdentityResult};

/// HMAC-signed token issuer
#[derive(Clone)]
pub struct HmacTokenIssuer {
    secret: [u8; 32],
}

impl HmacTokenIssuer {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    fn sign(&self, user_ref: &UserRefId) -> [u8; 32] {
        hmac_sha256(&self.secret, user_ref.to_string().as_bytes())
    }
}

impl TokenIssuer for HmacTokenIssuer {
    async fn issue(&self, user_ref: &UserRefId) -> IdentityResult<String> {
        let signature = self.sign(user_ref);
        Ok(format!("{}.{}", user_ref, to_base64url(&signature)))
    }

    async fn verify(&self, token: &str) -> IdentityResult<UserRefId> {
        let (ref_part, sig_part) = token
            .split_once('.')
            .ok_or(IdentityError::TokenInvalid)?;

        let user_ref =
            UserRefId::parse_str(ref_part).map_err(|_| IdentityError::TokenInvalid)?;

        let presented =
            from_base64url(sig_part).map_err(|_| IdentityError::TokenInvalid)?;
        let expected = self.sign(&user_ref);

        if !constant_time_eq(&presented, &expected) {
            return Err(IdentityError::TokenInvalid);
        }

        Ok(user_ref)
    }
}
