//! Profile Value Object
//!
//! Optional personal details shown on a user record.

use serde::{Deserialize, Serialize};

/// Maximum length of first/last name (in characters)
pub const PERSON_NAME_MAX_LENGTH: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ProfileError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
}

impl Profile {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        bio: impl Into<String>,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            bio: bio.into(),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        check_person_name("first_name", &self.first_name)?;
        check_person_name("last_name", &self.last_name)
    }
}

fn check_person_name(field: &'static str, value: &str) -> Result<(), ProfileError> {
    if value.chars().count() > PERSON_NAME_MAX_LENGTH {
        return Err(ProfileError {
            field,
            message: format!("Must be at most {PERSON_NAME_MAX_LENGTH} characters"),
        });
    }
    Ok(())
}
