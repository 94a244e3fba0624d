//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::token::TokenSigner;
use std::time::Duration;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (1 day)
    pub token_ttl: Duration,
    /// Sender address for confirmation mail
    pub mail_from: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl", &self.token_ttl)
            .field("mail_from", &self.mail_from)
            .finish_non_exhaustive()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600), // 1 day
            mail_from: "noreply@yamdb.local".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (short-lived tokens, random secret)
    pub fn development() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),
            ..Self::with_random_secret()
        }
    }

    pub fn token_signer(&self) -> TokenSigner {
        TokenSigner::new(self.token_secret, self.token_ttl)
    }
}
