//! Confirmation Code Value Object
//!
//! A single-use secret mailed to the user at signup. Only its SHA-256
//! digest is ever stored.

use platform::crypto;

/// Random bytes per code (base64url: 43 characters)
pub const CONFIRMATION_CODE_BYTES: usize = 32;

/// Plain code, as sent to the user
#[derive(Clone, PartialEq, Eq)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Fresh code from the OS random source
    pub fn generate() -> Self {
        Self(crypto::random_token(CONFIRMATION_CODE_BYTES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digest(&self) -> ConfirmationDigest {
        ConfirmationDigest::of(&self.0)
    }
}

// Keep the secret out of logs
impl std::fmt::Debug for ConfirmationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConfirmationCode(***)")
    }
}

/// Stored form of a confirmation code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDigest([u8; 32]);

impl ConfirmationDigest {
    pub fn of(candidate: &str) -> Self {
        Self(crypto::sha256(candidate.as_bytes()))
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, candidate: &str) -> bool {
        crypto::constant_time_eq(&self.0, &crypto::sha256(candidate.as_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Create from database value; `None` when the column is corrupt
    pub fn from_db(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_differ() {
        let a = ConfirmationCode::generate();
        let b = ConfirmationCode::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 43);
    }

    #[test]
    fn test_digest_matches_only_its_code() {
        let code = ConfirmationCode::generate();
        let digest = code.digest();
        assert!(digest.matches(code.as_str()));
        assert!(!digest.matches(ConfirmationCode::generate().as_str()));
        assert!(!digest.matches(""));
    }

    #[test]
    fn test_debug_hides_code() {
        let code = ConfirmationCode::generate();
        assert!(!format!("{:?}", code).contains(code.as_str()));
    }

    #[test]
    fn test_from_db_length() {
        let digest = ConfirmationCode::generate().digest();
        assert_eq!(ConfirmationDigest::from_db(digest.as_bytes()), Some(digest));
        assert_eq!(ConfirmationDigest::from_db(&[1, 2, 3]), None);
    }
}
