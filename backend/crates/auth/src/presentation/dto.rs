//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub username: String,
    pub email: String,
}

// ============================================================================
// Token
// ============================================================================

/// Both optional: an unknown user is reported before a missing code
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub confirmation_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.user_name.to_string(),
            email: user.email.to_string(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            bio: user.profile.bio.clone(),
            role: user.role.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    /// `Some` whenever the key is in the body, `"role": null` included
    #[serde(default, deserialize_with = "sent")]
    pub role: Option<Option<String>>,
}

/// Marks a field as sent; only called by serde when the key is present
fn sent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
}
