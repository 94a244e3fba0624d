//! Access Tokens
//!
//! Stateless bearer tokens: `base64url(claims JSON) "." base64url(HMAC-SHA256)`.
//! The token only names the user; role and superuser flag are read from the
//! store on every request so a demotion takes effect immediately.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use uuid::Uuid;

use crate::crypto::{from_base64_url, to_base64_url};

type HmacSha256 = Hmac<Sha256>;

/// Claims carried inside an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Issued at (Unix ms)
    pub iat_ms: i64,
    /// Expires at (Unix ms)
    pub exp_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid")]
    BadSignature,
    #[error("Token has expired")]
    Expired,
}

/// Issues and verifies access tokens with one secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: [u8; 32], ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn issue(&self, subject: Uuid) -> String {
        self.issue_at(subject, Utc::now().timestamp_millis())
    }

    pub fn issue_at(&self, subject: Uuid, now_ms: i64) -> String {
        let claims = TokenClaims {
            sub: subject,
            iat_ms: now_ms,
            exp_ms: now_ms + self.ttl.as_millis() as i64,
        };
        // Serializing a struct of plain fields cannot fail
        let payload = to_base64_url(&serde_json::to_vec(&claims).unwrap_or_default());
        let mut mac = self.keyed_mac();
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();
        format!("{}.{}", payload, to_base64_url(&signature))
    }

    fn keyed_mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    pub fn verify_at(&self, token: &str, now_ms: i64) -> Result<TokenClaims, TokenError> {
        let (payload, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let signature = from_base64_url(signature_b64).map_err(|_| TokenError::Malformed)?;
        let mut mac = self.keyed_mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| TokenError::BadSignature)?;

        let raw = from_base64_url(payload).map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

        if now_ms >= claims.exp_ms {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new([7u8; 32], Duration::from_secs(60))
    }

    #[test]
    fn test_issue_then_verify() {
        let user = Uuid::new_v4();
        let token = signer().issue_at(user, 1_000);
        let claims = signer().verify_at(&token, 2_000).unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.iat_ms, 1_000);
        assert_eq!(claims.exp_ms, 61_000);
    }

    #[test]
    fn test_expired() {
        let token = signer().issue_at(Uuid::new_v4(), 0);
        assert_eq!(signer().verify_at(&token, 60_000), Err(TokenError::Expired));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = signer().issue_at(Uuid::new_v4(), 0);
        let other = TokenSigner::new([8u8; 32], Duration::from_secs(60));
        assert_eq!(other.verify_at(&token, 1), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = signer().issue_at(Uuid::new_v4(), 0);
        let (_, signature) = token.split_once('.').unwrap();
        let forged_claims = TokenClaims {
            sub: Uuid::new_v4(),
            iat_ms: 0,
            exp_ms: i64::MAX,
        };
        let forged_payload = to_base64_url(&serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}", forged_payload, signature);
        assert_eq!(signer().verify_at(&forged, 1), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let token = signer().issue_at(Uuid::new_v4(), 0);
        let (payload, signature) = token.split_once('.').unwrap();
        let half = &from_base64_url(signature).unwrap()[..16];
        let truncated = format!("{}.{}", payload, to_base64_url(half));
        assert_eq!(signer().verify_at(&truncated, 1), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_signature_is_hmac_sha256_of_payload() {
        let token = signer().issue_at(Uuid::new_v4(), 0);
        let (payload, signature) = token.split_once('.').unwrap();

        let mut mac = HmacSha256::new_from_slice(&[7u8; 32]).unwrap();
        mac.update(payload.as_bytes());
        assert_eq!(
            from_base64_url(signature).unwrap(),
            mac.finalize().into_bytes().to_vec()
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(signer().verify_at("garbage", 0), Err(TokenError::Malformed));
        assert_eq!(signer().verify_at("a.!!!", 0), Err(TokenError::Malformed));
    }
}
