use std::str::FromStr;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::Deserialize;
use tracing::error;

/// bcrypt work factor applied to every new hash.
pub const DEFAULT_COST: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Bcrypt,
    Argon2,
}

impl HashScheme {
    /// Identifies the scheme of a stored hash from its prefix.
    pub fn detect(hash: &str) -> Option<Self> {
        if hash.starts_with("$argon2") {
            Some(HashScheme::Argon2)
        } else if ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|p| hash.starts_with(p))
        {
            Some(HashScheme::Bcrypt)
        } else {
            None
        }
    }
}

impl FromStr for HashScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(HashScheme::Bcrypt),
            "argon2" => Ok(HashScheme::Argon2),
            other => anyhow::bail!("unknown password scheme: {other}"),
        }
    }
}

/// Salted one-way password hashing.
///
/// New hashes use the configured scheme; verification picks the scheme from
/// the stored hash, so hashes written under either scheme keep verifying.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    scheme: HashScheme,
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(HashScheme::default())
    }
}

impl PasswordHasher {
    pub fn new(scheme: HashScheme) -> Self {
        Self {
            scheme,
            cost: DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt cost. Argon2 always runs with its default params.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn hash(&self, plain: &str) -> anyhow::Result<String> {
        match self.scheme {
            HashScheme::Bcrypt => bcrypt::hash(plain, self.cost).map_err(|e| {
                error!(error = %e, "bcrypt hash error");
                anyhow::anyhow!(e)
            }),
            HashScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(plain.as_bytes(), &salt)
                    .map_err(|e| {
                        error!(error = %e, "argon2 hash_password error");
                        anyhow::anyhow!(e.to_string())
                    })?
                    .to_string();
                Ok(hash)
            }
        }
    }

    pub fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool> {
        match HashScheme::detect(hash) {
            Some(HashScheme::Bcrypt) => bcrypt::verify(plain, hash).map_err(|e| {
                error!(error = %e, "bcrypt verify error");
                anyhow::anyhow!(e)
            }),
            Some(HashScheme::Argon2) => {
                let parsed = PasswordHash::new(hash).map_err(|e| {
                    error!(error = %e, "argon2 parse hash error");
                    anyhow::anyhow!(e.to_string())
                })?;
                Ok(Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok())
            }
            None => {
                error!("stored password hash has an unrecognized format");
                anyhow::bail!("unrecognized password hash format")
            }
        }
    }

    pub async fn hash_async(&self, plain: String) -> anyhow::Result<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| anyhow::anyhow!("hash task failed: {e}"))?
    }

    pub async fn verify_async(&self, plain: String, hash: String) -> anyhow::Result<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("verify task failed: {e}"))?
    }
}
