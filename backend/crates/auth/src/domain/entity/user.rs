//! User Entity
//!
//! A registered account: identity, role, the pending confirmation code and
//! profile details.

use chrono::{DateTime, Utc};
use kernel::access::{Actor, UserRole};
use kernel::id::UserId;

use crate::domain::value_object::{
    confirmation_code::{ConfirmationCode, ConfirmationDigest},
    email::Email,
    profile::Profile,
    user_name::UserName,
};

/// Outcome of checking a submitted confirmation code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    Accepted,
    /// Nothing pending (never issued, or already used)
    NoPendingCode,
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, case-sensitive handle
    pub user_name: UserName,
    /// Unique, lower-cased
    pub email: Email,
    pub role: UserRole,
    /// Staff override, treated as admin or above everywhere
    pub is_superuser: bool,
    /// Digest of the pending single-use code
    pub confirmation_digest: Option<ConfirmationDigest>,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(user_name: UserName, email: Email) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            role: UserRole::default(),
            is_superuser: false,
            confirmation_digest: None,
            profile: Profile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace any pending code with a fresh one and return it for delivery
    pub fn issue_confirmation_code(&mut self) -> ConfirmationCode {
        let code = ConfirmationCode::generate();
        self.confirmation_digest = Some(code.digest());
        self.touch();
        code
    }

    /// Check `candidate`; an accepted code is consumed
    pub fn redeem_confirmation_code(&mut self, candidate: &str) -> CodeCheck {
        let check = match &self.confirmation_digest {
            None => CodeCheck::NoPendingCode,
            Some(digest) if digest.matches(candidate) => CodeCheck::Accepted,
            Some(_) => CodeCheck::Mismatch,
        };
        if check == CodeCheck::Accepted {
            self.confirmation_digest = None;
            self.touch();
        }
        check
    }

    /// Identity handed to authorization checks
    pub fn actor(&self) -> Actor {
        let actor = Actor::new(self.user_id, self.user_name.as_str(), self.role);
        if self.is_superuser {
            actor.superuser()
        } else {
            actor
        }
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.touch();
    }

    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.touch();
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.touch();
    }

    /// Promote to superuser (startup bootstrap)
    pub fn grant_superuser(&mut self) {
        self.is_superuser = true;
        self.role = UserRole::Admin;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            UserName::new("critic").unwrap(),
            Email::new("critic@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = user();
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_superuser);
        assert!(user.confirmation_digest.is_none());
    }

    #[test]
    fn test_code_is_single_use() {
        let mut user = user();
        let code = user.issue_confirmation_code();

        assert_eq!(user.redeem_confirmation_code("wrong"), CodeCheck::Mismatch);
        assert!(user.confirmation_digest.is_some());

        assert_eq!(user.redeem_confirmation_code(code.as_str()), CodeCheck::Accepted);
        assert_eq!(
            user.redeem_confirmation_code(code.as_str()),
            CodeCheck::NoPendingCode
        );
    }

    #[test]
    fn test_reissue_invalidates_previous_code() {
        let mut user = user();
        let first = user.issue_confirmation_code();
        let second = user.issue_confirmation_code();
        assert_eq!(user.redeem_confirmation_code(first.as_str()), CodeCheck::Mismatch);
        assert_eq!(user.redeem_confirmation_code(second.as_str()), CodeCheck::Accepted);
    }

    #[test]
    fn test_actor_carries_role_and_superuser() {
        let mut user = user();
        user.set_role(UserRole::Moderator);
        let actor = user.actor();
        assert_eq!(actor.role, UserRole::Moderator);
        assert!(!actor.is_admin());

        user.grant_superuser();
        assert!(user.actor().is_superuser);
        assert!(user.actor().is_admin());
    }
}
