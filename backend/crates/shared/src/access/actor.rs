//! Authenticated Actor
//!
//! The identity every use case receives explicitly. Built per request from
//! the access token and the current user record, never cached globally.

use crate::access::role::UserRole;
use crate::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub user_name: String,
    pub role: UserRole,
    pub is_superuser: bool,
}

impl Actor {
    pub fn new(user_id: UserId, user_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            role,
            is_superuser: false,
        }
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Admin role, or the superuser flag
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.role.is_admin()
    }

    /// Moderator, admin, or superuser
    #[inline]
    pub fn is_moderator_or_higher(&self) -> bool {
        self.is_superuser || self.role.is_moderator_or_higher()
    }

    #[inline]
    pub fn is(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
