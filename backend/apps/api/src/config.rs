//! Server Configuration
//!
//! Read once from the environment (after `.env` is loaded).

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::crypto;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub mail_relay_url: Option<String>,
    /// `(username, email)` to ensure as superuser at startup
    pub superuser: Option<(String, String)>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let database_max_connections = optional("DATABASE_MAX_CONNECTIONS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?
            .unwrap_or(5);

        let listen_addr = optional("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
            .parse()
            .context("LISTEN_ADDR must be host:port")?;

        let frontend_origins = optional("FRONTEND_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let superuser = match (optional("SUPERUSER_USERNAME"), optional("SUPERUSER_EMAIL")) {
            (Some(name), Some(email)) => Some((name, email)),
            (None, None) => None,
            _ => bail!("SUPERUSER_USERNAME and SUPERUSER_EMAIL must be set together"),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            frontend_origins,
            mail_relay_url: optional("MAIL_RELAY_URL"),
            superuser,
            auth: auth_config()?,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match optional("ACCESS_TOKEN_SECRET") {
        Some(secret_b64) => AuthConfig {
            token_secret: decode_secret(&secret_b64)?,
            ..AuthConfig::default()
        },
        None if cfg!(debug_assertions) => {
            tracing::warn!("ACCESS_TOKEN_SECRET not set, using a random secret");
            AuthConfig::with_random_secret()
        }
        None => bail!("ACCESS_TOKEN_SECRET must be set in production"),
    };

    if let Some(ttl) = optional("ACCESS_TOKEN_TTL_SECS") {
        let secs: u64 = ttl
            .parse()
            .context("ACCESS_TOKEN_TTL_SECS must be a number of seconds")?;
        config.token_ttl = Duration::from_secs(secs);
    }
    if let Some(from) = optional("MAIL_FROM") {
        config.mail_from = from;
    }
    Ok(config)
}

/// Base64 (standard alphabet) of exactly 32 bytes
fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes =
        crypto::from_base64(secret_b64.trim()).context("ACCESS_TOKEN_SECRET must be base64")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("ACCESS_TOKEN_SECRET must decode to 32 bytes, got {len}"))
}

/// Set and non-blank
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_requires_32_bytes() {
        let ok = crypto::to_base64(&[7u8; 32]);
        assert_eq!(decode_secret(&ok).unwrap(), [7u8; 32]);

        let short = crypto::to_base64(&[7u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }
}
