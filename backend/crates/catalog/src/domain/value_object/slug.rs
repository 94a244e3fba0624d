//! Slug Value Object
//!
//! URL key of a category or genre: `[-a-zA-Z0-9_]`, 1..=50 characters.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SLUG_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    Empty,
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char },
}

impl fmt::Display for SlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Slug cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Slug is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char } => write!(
                f,
                "Invalid character '{char}'. Only latin letters, digits, '-' and '_' are allowed"
            ),
        }
    }
}

impl std::error::Error for SlugError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn new(input: impl AsRef<str>) -> Result<Self, SlugError> {
        let slug = input.as_ref().trim();

        if slug.is_empty() {
            return Err(SlugError::Empty);
        }
        let length = slug.chars().count();
        if length > SLUG_MAX_LENGTH {
            return Err(SlugError::TooLong {
                length,
                max: SLUG_MAX_LENGTH,
            });
        }
        if let Some(c) = slug
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter { char: c });
        }

        Ok(Self(slug.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(Slug::new("sci-fi").is_ok());
        assert!(Slug::new("rock_n_roll").is_ok());
        assert!(Slug::new("Films2024").is_ok());
        assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_invalid_slugs() {
        assert_eq!(Slug::new(" "), Err(SlugError::Empty));
        assert_eq!(
            Slug::new("sci fi"),
            Err(SlugError::InvalidCharacter { char: ' ' })
        );
        assert_eq!(
            Slug::new("фильмы"),
            Err(SlugError::InvalidCharacter { char: 'ф' })
        );
        assert!(matches!(
            Slug::new("a".repeat(SLUG_MAX_LENGTH + 1)),
            Err(SlugError::TooLong { .. })
        ));
    }
}
