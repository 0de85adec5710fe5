use anyhow::Context;
use serde::Deserialize;

use crate::auth::password::HashScheme;

/// Upper bound for `JWT_TTL_MINUTES`: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub password_scheme: HashScheme,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .context("JWT_SECRET must be set")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "authgate".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "authgate-users".into()),
            ttl_minutes: match lookup("JWT_TTL_MINUTES") {
                Some(v) => v
                    .parse::<i64>()
                    .ok()
                    .filter(|m| (1..=MAX_TTL_MINUTES).contains(m))
                    .with_context(|| {
                        format!("JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {v:?}")
                    })?,
                None => 60,
            },
        };
        let password_scheme = match lookup("PASSWORD_SCHEME") {
            Some(v) => v.parse::<HashScheme>()?,
            None => HashScheme::default(),
        };
        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {v:?}"))?,
            None => 8080,
        };

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            jwt,
            password_scheme,
        })
    }

    /// `host:port` the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
