//! In-Memory Repository Implementation
//!
//! Backing store for workflow tests. Enforces the same write-time username
//! uniqueness contract as the PostgreSQL repository.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{CredentialId, UserRefId, Username};
use crate::error::{IdentityError, IdentityResult};

/// In-memory credential repository
#[derive(Clone, Default)]
pub struct MemoryCredentialRepository {
    store: Arc<RwLock<HashMap<Uuid, Credential>>>,
}

impl MemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl CredentialRepository for MemoryCredentialRepository {
    async fn add(&self, credential: &Credential) -> IdentityResult<()> {
        let mut store = self.store.write().await;

        let taken = store
            .values()
            .any(|c| c.username() == credential.username());
        if taken {
            return Err(IdentityError::UsernameTaken);
        }

        store.insert(credential.id().into_uuid(), credential.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CredentialId) -> IdentityResult<Option<Credential>> {
        Ok(self.store.read().await.get(id.as_uuid()).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> IdentityResult<Option<Credential>> {
        let store = self.store.read().await;
        Ok(store.values().find(|c| c.username() == username).cloned())
    }

    async fn find_by_user_ref(&self, user_ref: &UserRefId) -> IdentityResult<Option<Credential>> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .find(|c| c.user_ref() == *user_ref)
            .cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> IdentityResult<bool> {
        let store = self.store.read().await;
        Ok(store.values().any(|c| c.username() == username))
    }

    async fn update(&self, credential: &Credential) -> IdentityResult<()> {
        let mut store = self.store.write().await;

        if !store.contains_key(credential.id().as_uuid()) {
            return Err(IdentityError::NotFound);
        }

        let taken = store
            .values()
            .any(|c| c.id() != credential.id() && c.username() == credential.username());
        if taken {
            return Err(IdentityError::UsernameTaken);
        }

        store.insert(credential.id().into_uuid(), credential.clone());
        Ok(())
    }

    async fn delete(&self, id: &CredentialId) -> IdentityResult<()> {
        self.store.write().await.remove(id.as_uuid());
        Ok(())
    }
}
