//! Own Profile Use Case
//!
//! `/users/me`: any authenticated user reads and edits their own record,
//! except the role.

use std::sync::Arc;

use kernel::access::{AccessDenied, Action, Actor, authorize};

use crate::application::user_patch::{UserPatch, apply_patch};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct OwnProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> OwnProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, actor: Option<&Actor>) -> AuthResult<User> {
        let actor = actor.ok_or(AccessDenied::AuthenticationRequired)?;
        self.repo
            .find_by_id(&actor.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// A patch that names `role` is refused as a whole
    pub async fn update(&self, actor: Option<&Actor>, patch: UserPatch) -> AuthResult<User> {
        let actor = actor.ok_or(AccessDenied::AuthenticationRequired)?;
        if patch.role.is_some() {
            authorize(Some(actor), Action::ChangeOwnRole)?;
        }

        let mut user = self
            .repo
            .find_by_id(&actor.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        apply_patch(self.repo.as_ref(), &mut user, patch).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");
        Ok(user)
    }
}
