//! Display name of a title, category or genre (1..=256 characters)

use std::fmt;

pub const NAME_MAX_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNameError {
    Empty,
    TooLong { length: usize, max: usize },
}

impl fmt::Display for CatalogNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Name is too long ({length} chars, maximum {max})")
            }
        }
    }
}

impl std::error::Error for CatalogNameError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogName(String);

impl CatalogName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, CatalogNameError> {
        let name = input.as_ref().trim();
        if name.is_empty() {
            return Err(CatalogNameError::Empty);
        }
        let length = name.chars().count();
        if length > NAME_MAX_LENGTH {
            return Err(CatalogNameError::TooLong {
                length,
                max: NAME_MAX_LENGTH,
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
