//! Workflow Tests
//!
//! End-to-end exercises of the use cases against the in-memory store, the
//! real HMAC token issuer, and the static admin directory.

use std::sync::Arc;

use crate::application::{
    IdentityConfig, RegisterInput, RegisterUseCase, SignInAdminInput, SignInAdminUseCase,
    SignInClientUseCase, SignInInput, UpdateCredentialsInput, UpdateCredentialsUseCase,
    SIGN_IN_REJECTED,
};
use crate::domain::collaborator::TokenIssuer;
use crate::domain::value_object::UserRefId;
use crate::error::IdentityError;
use crate::infra::{HmacTokenIssuer, MemoryCredentialRepository, StaticAdminDirectory};

struct Harness {
    repo: Arc<MemoryCredentialRepository>,
    token_issuer: Arc<HmacTokenIssuer>,
    config: Arc<IdentityConfig>,
}

impl Harness {
    fn new() -> Self {
        let config = IdentityConfig::with_random_secret();
        Self {
            repo: Arc::new(MemoryCredentialRepository::new()),
            token_issuer: Arc::new(HmacTokenIssuer::new(config.token_secret)),
            config: Arc::new(config),
        }
    }

    async fn register(&self, username: &str, password: &str) -> (String, UserRefId) {
        let user_ref = UserRefId::new();
        let output = RegisterUseCase::new(self.repo.clone(), self.config.clone())
            .execute(RegisterInput {
                username: username.to_string(),
                password: password.to_string(),
                user_ref,
            })
            .await
            .unwrap();
        (output.credential_id, user_ref)
    }

    fn sign_in(&self) -> SignInClientUseCase<MemoryCredentialRepository, HmacTokenIssuer> {
        SignInClientUseCase::new(
            self.repo.clone(),
            self.token_issuer.clone(),
            self.config.clone(),
        )
    }

    fn update(&self) -> UpdateCredentialsUseCase<MemoryCredentialRepository> {
        UpdateCredentialsUseCase::new(self.repo.clone(), self.config.clone())
    }
}

fn sign_in_input(username: &str, password: &str) -> SignInInput {
    SignInInput {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn register_then_sign_in() {
    let harness = Harness::new();
    let (credential_id, user_ref) = harness.register("alice", "Secret123").await;

    let output = harness
        .sign_in()
        .execute(sign_in_input("alice", "Secret123"))
        .await
        .unwrap();

    assert!(output.success);
    assert_eq!(output.credential_id.as_deref(), Some(credential_id.as_str()));
    assert_eq!(output.user_ref.as_deref(), Some(user_ref.to_string().as_str()));
    assert_eq!(output.username.as_deref(), Some("alice"));

    // The minted token verifies back to the same user reference
    let token = output.token.unwrap();
    let recovered = harness.token_issuer.verify(&token).await.unwrap();
    assert_eq!(recovered, user_ref);
}

#[tokio::test]
async fn register_rejects_invalid_input() {
    let harness = Harness::new();
    let use_case = RegisterUseCase::new(harness.repo.clone(), harness.config.clone());

    for (username, password) in [
        ("ab", "Secret123"),   // name too short
        ("   ", "Secret123"),  // blank name
        ("alice", "short"),    // password too short
        ("alice", "        "), // blank password
    ] {
        let result = use_case
            .execute(RegisterInput {
                username: username.to_string(),
                password: password.to_string(),
                user_ref: UserRefId::new(),
            })
            .await;
        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }

    assert!(harness.repo.is_empty().await);
}

#[tokio::test]
async fn duplicate_registration_leaves_store_unchanged() {
    let harness = Harness::new();
    harness.register("alice", "Secret123").await;

    let result = RegisterUseCase::new(harness.repo.clone(), harness.config.clone())
        .execute(RegisterInput {
            username: "alice".to_string(),
            password: "OtherSecret9".to_string(),
            user_ref: UserRefId::new(),
        })
        .await;

    assert!(matches!(result, Err(IdentityError::UsernameTaken)));
    assert_eq!(harness.repo.len().await, 1);

    // The original password still signs in
    let output = harness
        .sign_in()
        .execute(sign_in_input("alice", "Secret123"))
        .await
        .unwrap();
    assert!(output.success);
}

// ============================================================================
// Client sign-in
// ============================================================================

#[tokio::test]
async fn sign_in_failures_share_one_message() {
    let harness = Harness::new();
    harness.register("alice", "Secret123").await;

    // Unknown username, wrong password, and malformed username all read
    // exactly the same.
    for (username, password) in [
        ("nobody", "Secret123"),
        ("alice", "WrongSecret1"),
        ("a", "Secret123"),
    ] {
        let output = harness
            .sign_in()
            .execute(sign_in_input(username, password))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.message, SIGN_IN_REJECTED);
        assert!(output.token.is_none());
        assert!(output.credential_id.is_none());
    }
}

// ============================================================================
// Admin sign-in
// ============================================================================

#[tokio::test]
async fn admin_sign_in_checks_pin_after_password() {
    let harness = Harness::new();
    let (_, admin_ref) = harness.register("root_admin", "Secret123").await;
    let directory = Arc::new(StaticAdminDirectory::new().with_admin(admin_ref, "240913"));

    let use_case = SignInAdminUseCase::new(
        harness.repo.clone(),
        harness.token_issuer.clone(),
        directory,
        harness.config.clone(),
    );

    let admin_input = |password: &str, pin: &str| SignInAdminInput {
        credentials: sign_in_input("root_admin", password),
        security_pin: pin.to_string(),
    };

    let output = use_case.execute(admin_input("Secret123", "240913")).await.unwrap();
    assert!(output.success);
    assert!(output.token.is_some());

    // Wrong pin and wrong password are indistinguishable to the caller
    let wrong_pin = use_case.execute(admin_input("Secret123", "000000")).await.unwrap();
    let wrong_password = use_case.execute(admin_input("WrongSecret1", "240913")).await.unwrap();
    assert!(!wrong_pin.success);
    assert!(!wrong_password.success);
    assert_eq!(wrong_pin.message, wrong_password.message);
    assert_eq!(wrong_pin.message, SIGN_IN_REJECTED);
}

#[tokio::test]
async fn non_admin_rejected_even_with_right_password() {
    let harness = Harness::new();
    let (_, _client_ref) = harness.register("alice", "Secret123").await;

    // Directory knows no admins
    let use_case = SignInAdminUseCase::new(
        harness.repo.clone(),
        harness.token_issuer.clone(),
        Arc::new(StaticAdminDirectory::new()),
        harness.config.clone(),
    );

    let output = use_case
        .execute(SignInAdminInput {
            credentials: sign_in_input("alice", "Secret123"),
            security_pin: "240913".to_string(),
        })
        .await
        .unwrap();

    assert!(!output.success);
    assert_eq!(output.message, SIGN_IN_REJECTED);
}

// ============================================================================
// Credential rotation
// ============================================================================

#[tokio::test]
async fn password_rotation_invalidates_old_secret() {
    let harness = Harness::new();
    let (_, user_ref) = harness.register("alice", "Secret123").await;

    harness
        .update()
        .execute(UpdateCredentialsInput {
            user_ref,
            current_password: "Secret123".to_string(),
            new_username: None,
            new_password: Some("NextSecret9".to_string()),
        })
        .await
        .unwrap();

    let old = harness
        .sign_in()
        .execute(sign_in_input("alice", "Secret123"))
        .await
        .unwrap();
    assert!(!old.success);

    let new = harness
        .sign_in()
        .execute(sign_in_input("alice", "NextSecret9"))
        .await
        .unwrap();
    assert!(new.success);
}

#[tokio::test]
async fn rename_requires_current_password() {
    let harness = Harness::new();
    let (_, user_ref) = harness.register("alice", "Secret123").await;

    let result = harness
        .update()
        .execute(UpdateCredentialsInput {
            user_ref,
            current_password: "WrongSecret1".to_string(),
            new_username: Some("alice_2".to_string()),
            new_password: None,
        })
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));

    // Rename with the right password; sign-in moves to the new name
    let output = harness
        .update()
        .execute(UpdateCredentialsInput {
            user_ref,
            current_password: "Secret123".to_string(),
            new_username: Some("alice_2".to_string()),
            new_password: None,
        })
        .await
        .unwrap();
    assert_eq!(output.username, "alice_2");

    assert!(
        !harness
            .sign_in()
            .execute(sign_in_input("alice", "Secret123"))
            .await
            .unwrap()
            .success
    );
    assert!(
        harness
            .sign_in()
            .execute(sign_in_input("alice_2", "Secret123"))
            .await
            .unwrap()
            .success
    );
}

#[tokio::test]
async fn rename_to_taken_username_conflicts() {
    let harness = Harness::new();
    harness.register("alice", "Secret123").await;
    let (_, bob_ref) = harness.register("bobby", "Secret123").await;

    let result = harness
        .update()
        .execute(UpdateCredentialsInput {
            user_ref: bob_ref,
            current_password: "Secret123".to_string(),
            new_username: Some("alice".to_string()),
            new_password: None,
        })
        .await;

    assert!(matches!(result, Err(IdentityError::UsernameTaken)));

    // Bob keeps the old name
    assert!(
        harness
            .sign_in()
            .execute(sign_in_input("bobby", "Secret123"))
            .await
            .unwrap()
            .success
    );
}

#[tokio::test]
async fn nothing_to_update_fails_before_store() {
    let harness = Harness::new();

    // Unknown user reference on purpose: the shape check must fire first,
    // so we see Validation rather than NotFound.
    let result = harness
        .update()
        .execute(UpdateCredentialsInput {
            user_ref: UserRefId::new(),
            current_password: "Secret123".to_string(),
            new_username: None,
            new_password: None,
        })
        .await;

    assert!(matches!(result, Err(IdentityError::Validation(_))));
}

#[tokio::test]
async fn update_for_unknown_user_ref_is_not_found() {
    let harness = Harness::new();

    let result = harness
        .update()
        .execute(UpdateCredentialsInput {
            user_ref: UserRefId::new(),
            current_password: "Secret123".to_string(),
            new_username: Some("ghost_name".to_string()),
            new_password: None,
        })
        .await;

    assert!(matches!(result, Err(IdentityError::NotFound)));
}
