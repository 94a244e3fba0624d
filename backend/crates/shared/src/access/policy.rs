//! Access Policy
//!
//! One table maps every guarded [`Action`] to the [`Requirement`] an actor
//! must satisfy; [`authorize`] is the only place that table is evaluated.
//!
//! | action | requirement |
//! |---|---|
//! | read titles, categories, genres, reviews, comments | anyone, anonymous included |
//! | create/update/delete title, category, genre | admin or superuser |
//! | create review or comment | any authenticated user |
//! | update/delete review or comment | its author, moderator, admin or superuser |
//! | manage arbitrary user records | admin or superuser |
//! | change one's own role | nobody |

use thiserror::Error;

use crate::access::actor::Actor;
use crate::error::{app_error::AppError, kind::ErrorKind};
use crate::id::UserId;

/// Guarded operation, with the resource state the decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    ReadPublic,
    WriteCatalog,
    CreatePost,
    ModifyPost { author: &'a UserId },
    ManageUsers,
    ChangeOwnRole,
}

/// Capability an actor must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    Anyone,
    Authenticated,
    AuthorOrModerator(&'a UserId),
    Admin,
    Nobody,
}

impl<'a> Action<'a> {
    pub const fn requirement(&self) -> Requirement<'a> {
        match *self {
            Action::ReadPublic => Requirement::Anyone,
            Action::WriteCatalog => Requirement::Admin,
            Action::CreatePost => Requirement::Authenticated,
            Action::ModifyPost { author } => Requirement::AuthorOrModerator(author),
            Action::ManageUsers => Requirement::Admin,
            Action::ChangeOwnRole => Requirement::Nobody,
        }
    }
}

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Authentication credentials were not provided")]
    AuthenticationRequired,

    #[error("Only an admin can perform this action")]
    AdminOnly,

    #[error("Only the author, a moderator or an admin can perform this action")]
    AuthorModeratorOrAdminOnly,

    #[error("The role field cannot be changed by its owner")]
    RoleChangeForbidden,
}

impl AccessDenied {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            AccessDenied::AuthenticationRequired => ErrorKind::Unauthorized,
            AccessDenied::AdminOnly | AccessDenied::AuthorModeratorOrAdminOnly => {
                ErrorKind::Forbidden
            }
            AccessDenied::RoleChangeForbidden => ErrorKind::MethodNotAllowed,
        }
    }
}

impl From<AccessDenied> for AppError {
    fn from(denied: AccessDenied) -> Self {
        let err = AppError::new(denied.kind(), denied.to_string());
        match denied {
            AccessDenied::AuthenticationRequired => {
                err.with_action("Send an access token in the Authorization header")
            }
            AccessDenied::RoleChangeForbidden => err.with_field("role"),
            _ => err,
        }
    }
}

/// Evaluate `action` for `actor` (`None` is an anonymous caller)
pub fn authorize(actor: Option<&Actor>, action: Action<'_>) -> Result<(), AccessDenied> {
    let requirement = action.requirement();

    if requirement == Requirement::Nobody {
        return Err(AccessDenied::RoleChangeForbidden);
    }
    if requirement == Requirement::Anyone {
        return Ok(());
    }

    let actor = actor.ok_or(AccessDenied::AuthenticationRequired)?;

    match requirement {
        Requirement::Authenticated => Ok(()),
        Requirement::AuthorOrModerator(author) => {
            if actor.is(author) || actor.is_moderator_or_higher() {
                Ok(())
            } else {
                Err(AccessDenied::AuthorModeratorOrAdminOnly)
            }
        }
        Requirement::Admin => {
            if actor.is_admin() {
                Ok(())
            } else {
                Err(AccessDenied::AdminOnly)
            }
        }
        Requirement::Anyone | Requirement::Nobody => unreachable!("handled above"),
    }
}

// ============================================================================
// Named checks
// ============================================================================

#[inline]
pub fn can_read_public() -> bool {
    authorize(None, Action::ReadPublic).is_ok()
}

#[inline]
pub fn can_write_catalog(actor: Option<&Actor>) -> bool {
    authorize(actor, Action::WriteCatalog).is_ok()
}

#[inline]
pub fn can_create_review_or_comment(actor: Option<&Actor>) -> bool {
    authorize(actor, Action::CreatePost).is_ok()
}

#[inline]
pub fn can_modify_review_or_comment(actor: Option<&Actor>, author: &UserId) -> bool {
    authorize(actor, Action::ModifyPost { author }).is_ok()
}

#[inline]
pub fn can_manage_users(actor: Option<&Actor>) -> bool {
    authorize(actor, Action::ManageUsers).is_ok()
}

#[inline]
pub fn can_manage_own_role(actor: Option<&Actor>) -> bool {
    authorize(actor, Action::ChangeOwnRole).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::role::UserRole;

    fn actor(role: UserRole) -> Actor {
        Actor::new(UserId::new(), "someone", role)
    }

    #[test]
    fn test_public_reads_need_nothing() {
        assert!(can_read_public());
        assert_eq!(authorize(None, Action::ReadPublic), Ok(()));
    }

    #[test]
    fn test_catalog_writes_are_admin_only() {
        assert!(!can_write_catalog(None));
        assert!(!can_write_catalog(Some(&actor(UserRole::User))));
        assert!(!can_write_catalog(Some(&actor(UserRole::Moderator))));
        assert!(can_write_catalog(Some(&actor(UserRole::Admin))));
        assert!(can_write_catalog(Some(&actor(UserRole::User).superuser())));

        assert_eq!(
            authorize(Some(&actor(UserRole::Moderator)), Action::WriteCatalog),
            Err(AccessDenied::AdminOnly)
        );
        assert_eq!(
            authorize(None, Action::WriteCatalog),
            Err(AccessDenied::AuthenticationRequired)
        );
    }

    #[test]
    fn test_any_authenticated_user_can_post() {
        assert!(!can_create_review_or_comment(None));
        assert!(can_create_review_or_comment(Some(&actor(UserRole::User))));
    }

    #[test]
    fn test_modify_post_author_or_staff() {
        let author = actor(UserRole::User);
        let stranger = actor(UserRole::User);

        assert!(can_modify_review_or_comment(Some(&author), &author.user_id));
        assert!(!can_modify_review_or_comment(Some(&stranger), &author.user_id));
        assert!(!can_modify_review_or_comment(None, &author.user_id));
        assert!(can_modify_review_or_comment(
            Some(&actor(UserRole::Moderator)),
            &author.user_id
        ));
        assert!(can_modify_review_or_comment(
            Some(&actor(UserRole::Admin)),
            &author.user_id
        ));

        assert_eq!(
            authorize(
                Some(&stranger),
                Action::ModifyPost {
                    author: &author.user_id
                }
            ),
            Err(AccessDenied::AuthorModeratorOrAdminOnly)
        );
    }

    #[test]
    fn test_user_management() {
        assert!(!can_manage_users(Some(&actor(UserRole::Moderator))));
        assert!(can_manage_users(Some(&actor(UserRole::Admin))));
        assert!(can_manage_users(Some(&actor(UserRole::User).superuser())));
    }

    #[test]
    fn test_nobody_changes_own_role() {
        assert!(!can_manage_own_role(None));
        assert!(!can_manage_own_role(Some(&actor(UserRole::Admin))));
        assert!(!can_manage_own_role(Some(&actor(UserRole::Admin).superuser())));
    }

    #[test]
    fn test_denials_map_to_status() {
        assert_eq!(AccessDenied::AuthenticationRequired.kind().status_code(), 401);
        assert_eq!(AccessDenied::AdminOnly.kind().status_code(), 403);
        assert_eq!(AccessDenied::AuthorModeratorOrAdminOnly.kind().status_code(), 403);
        assert_eq!(AccessDenied::RoleChangeForbidden.kind().status_code(), 405);
        assert_ne!(
            AccessDenied::AdminOnly.to_string(),
            AccessDenied::AuthorModeratorOrAdminOnly.to_string()
        );
    }
}
