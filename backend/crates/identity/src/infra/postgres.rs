//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    CredentialId, CredentialPassword, UserRefId, Username,
};
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error, turning a unique violation into `UsernameTaken`
fn map_write_err(err: sqlx::Error) -> IdentityError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return IdentityError::UsernameTaken;
        }
    }
    IdentityError::Database(err)
}

impl CredentialRepository for PgCredentialRepository {
    async fn add(&self, credential: &Credential) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (
                credential_id,
                user_ref,
                username,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id().as_uuid())
        .bind(credential.user_ref().as_uuid())
        .bind(credential.username().as_str())
        .bind(credential.password().as_phc_string())
        .bind(credential.created_at())
        .bind(credential.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CredentialId) -> IdentityResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                credential_id,
                user_ref,
                username,
                password_hash,
                created_at,
                updated_at
            FROM credentials
            WHERE credential_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> IdentityResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                credential_id,
                user_ref,
                username,
                password_hash,
                created_at,
                updated_at
            FROM credentials
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn find_by_user_ref(&self, user_ref: &UserRefId) -> IdentityResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                credential_id,
                user_ref,
                username,
                password_hash,
                created_at,
                updated_at
            FROM credentials
            WHERE user_ref = $1
            "#,
        )
        .bind(user_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> IdentityResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM credentials WHERE username = $1)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, credential: &Credential) -> IdentityResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE credentials SET
                username = $2,
                password_hash = $3,
                updated_at = $4
            WHERE credential_id = $1
            "#,
        )
        .bind(credential.id().as_uuid())
        .bind(credential.username().as_str())
        .bind(credential.password().as_phc_string())
        .bind(credential.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &CredentialId) -> IdentityResult<()> {
        sqlx::query("DELETE FROM credentials WHERE credential_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    credential_id: Uuid,
    user_ref: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> IdentityResult<Credential> {
        Ok(Credential::from_db(
            CredentialId::from_uuid(self.credential_id),
            UserRefId::from_uuid(self.user_ref),
            Username::from_db(self.username),
            CredentialPassword::from_phc_string(self.password_hash)?,
            self.created_at,
            self.updated_at,
        ))
    }
}
