//! User Name Value Object
//!
//! The public handle a user signs up with and is addressed by in
//! `/users/{username}`.
//!
//! ## Invariants
//! - NFKC-normalized and trimmed before validation
//! - 1..=150 characters
//! - Letters, digits and `_ . @ + -` only (no whitespace)
//! - Not a reserved word (`me` names the current user)
//!
//! Case is preserved and significant: `Alice` and `alice` are different users.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '@', '+', '-'];

/// Values that would collide with a route segment
const RESERVED_WORDS: &[&str] = &["me"];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains invalid character
    InvalidCharacter { char: char, position: usize },

    /// User name is a reserved word
    Reserved { word: String },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only letters, digits and _ . @ + - are allowed"
                )
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' cannot be used as a user name")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Normalize (NFKC, trim) and validate raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = Self::normalize(input.as_ref());
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(normalized: &str) -> Result<(), UserNameError> {
        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (pos, ch) in normalized.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UserNameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        if RESERVED_WORDS.contains(&normalized) {
            return Err(UserNameError::Reserved {
                word: normalized.to_string(),
            });
        }

        Ok(())
    }

    /// Word characters (any script) plus the allowed specials
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
