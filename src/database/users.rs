use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{Claims, PasswordHasher, TokenSigner};
use crate::database::error::{is_unique_violation, StoreError};
use crate::database::models::User;

const USER_COLUMNS: &str =
    "id, email, password, uuid, is_active, reset_password, created, modified";

/// Registration, credential checks and lookups for users.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
    hasher: Arc<dyn PasswordHasher>,
    signer: TokenSigner,
}

impl UserStore {
    pub fn new(pool: PgPool, hasher: Arc<dyn PasswordHasher>, signer: TokenSigner) -> Self {
        Self { pool, hasher, signer }
    }

    /// Create a user, returning its id.
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, StoreError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::invalid("Email and password are required"));
        }
        if self.exists_by_email(email).await? {
            return Err(StoreError::Conflict("User already exists with given email".into()));
        }

        let hashed = self.hasher.hash(password);
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (email, password, uuid, created, modified)
             VALUES ($1, $2, $3, now(), now())
             RETURNING id",
        )
        .bind(email)
        .bind(&hashed)
        .bind(Uuid::new_v4())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration for the same email.
            if is_unique_violation(&e) {
                StoreError::Conflict("User already exists with given email".into())
            } else {
                StoreError::Sqlx(e)
            }
        })?;

        info!("Registered user {}", id);
        Ok(id)
    }

    /// Check credentials and issue a signed credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, StoreError> {
        let hashed = self.hasher.hash(password);
        let row: Option<(i64, Uuid)> =
            sqlx::query_as("SELECT id, uuid FROM users WHERE email = $1 AND password = $2")
                .bind(email.trim())
                .bind(&hashed)
                .fetch_optional(&self.pool)
                .await?;

        let (id, uuid) = row.ok_or_else(|| {
            warn!("Failed login attempt");
            StoreError::unauthorized("Authentication failure.")
        })?;

        self.signer.issue(id, uuid)
    }

    /// Verify a credential previously issued by [`UserStore::login`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, StoreError> {
        self.signer.verify(token)
    }

    pub async fn by_id(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::or_not_found(e, "User"))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
