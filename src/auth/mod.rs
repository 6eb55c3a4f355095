pub mod guard;
pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ConfigError, SecurityConfig};
use crate::database::StoreError;

pub use guard::{ensure_owner, Owned};
pub use password::{LegacySaltHasher, PasswordHasher};

/// Claims carried by an issued credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub uuid: Uuid,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(id: i64, uuid: Uuid, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            uuid,
            nbf: now.timestamp(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

/// HMAC signing and verification of credentials.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(&config.jwt_secret, config.token_lifetime()?))
    }

    /// Issue a credential for a user.
    pub fn issue(&self, user_id: i64, user_uuid: Uuid) -> Result<String, StoreError> {
        self.sign(&Claims::new(user_id, user_uuid, self.lifetime))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, StoreError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| StoreError::Unauthorized(format!("Failed to sign credential: {}", e)))
    }

    /// Verify a credential and decode its claims.
    ///
    /// Only the HMAC family is accepted; any other algorithm, a bad
    /// signature, an expired credential or a malformed token is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, StoreError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_nbf = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| StoreError::Unauthorized(format!("Invalid credential: {}", e)))
    }
}
