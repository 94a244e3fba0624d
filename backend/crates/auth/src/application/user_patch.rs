//! Partial user updates shared by self-service and admin edits

use kernel::access::UserRole;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, profile::Profile, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Fields to change; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    /// `Some` when the request named `role` at all; inner value is the
    /// submitted code (`user`, `moderator`, `admin`)
    pub role: Option<Option<String>>,
}

/// Parse a submitted role code
pub(crate) fn parse_role(code: &str) -> AuthResult<UserRole> {
    UserRole::from_code(code.trim()).ok_or_else(|| {
        AuthError::validation(
            "role",
            format!("\"{}\" is not a valid role (user, moderator, admin)", code.trim()),
        )
    })
}

/// Validate `patch`, check uniqueness against other users, apply, persist
///
/// Nothing on `user` changes unless every field is valid.
pub(crate) async fn apply_patch<R>(repo: &R, user: &mut User, patch: UserPatch) -> AuthResult<()>
where
    R: UserRepository,
{
    let user_name = match patch.user_name {
        Some(raw) => Some(UserName::new(raw)?).filter(|name| *name != user.user_name),
        None => None,
    };
    let email = match patch.email {
        Some(raw) => Some(Email::new(raw)?).filter(|email| *email != user.email),
        None => None,
    };
    let profile = if patch.first_name.is_some() || patch.last_name.is_some() || patch.bio.is_some()
    {
        let current = &user.profile;
        Some(Profile::new(
            patch.first_name.unwrap_or_else(|| current.first_name.clone()),
            patch.last_name.unwrap_or_else(|| current.last_name.clone()),
            patch.bio.unwrap_or_else(|| current.bio.clone()),
        )?)
    } else {
        None
    };
    let role = match patch.role {
        Some(Some(code)) => Some(parse_role(&code)?),
        Some(None) => return Err(AuthError::validation("role", "Role cannot be null")),
        None => None,
    };

    if let Some(name) = &user_name {
        if repo.find_by_user_name(name).await?.is_some() {
            return Err(AuthError::UserNameTaken);
        }
    }
    if let Some(email) = &email {
        if repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
    }

    if let Some(name) = user_name {
        user.set_user_name(name);
    }
    if let Some(email) = email {
        user.set_email(email);
    }
    if let Some(profile) = profile {
        user.set_profile(profile);
    }
    if let Some(role) = role {
        user.set_role(role);
    }

    repo.update(user).await
}
