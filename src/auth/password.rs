use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::ConfigError;

type HmacSha256 = Hmac<Sha256>;

/// Pluggable password hashing. Hashes must be deterministic so that login
/// can look users up by `(email, hash)`.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> String;
}

/// HMAC-SHA256 keyed by the site-wide secret over the deployment's legacy
/// salt followed by the password, hex encoded.
#[derive(Clone)]
pub struct LegacySaltHasher {
    mac: HmacSha256,
    salt: String,
}

impl LegacySaltHasher {
    pub fn new(secret: impl AsRef<[u8]>, salt: impl Into<String>) -> Result<Self, ConfigError> {
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .map_err(|e| ConfigError::Invalid("JWT_SECRET", e.to_string()))?;
        Ok(Self {
            mac,
            salt: salt.into(),
        })
    }
}

impl PasswordHasher for LegacySaltHasher {
    fn hash(&self, password: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(self.salt.as_bytes());
        mac.update(password.as_bytes());
        mac.finalize()
            .into_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
