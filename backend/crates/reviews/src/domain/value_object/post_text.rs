//! Post Text Value Object
//!
//! Body of a review or comment. Must contain something besides whitespace;
//! stored as written.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTextError;

impl fmt::Display for EmptyTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Text must not be empty")
    }
}

impl std::error::Error for EmptyTextError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyTextError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptyTextError);
        }
        Ok(Self(text))
    }

    pub fn from_db(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
