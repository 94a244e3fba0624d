//! Manage Users Use Case
//!
//! Admin (or superuser) CRUD over arbitrary user records, addressed by
//! username.

use std::sync::Arc;

use kernel::access::{Action, Actor, authorize};

use crate::application::user_patch::{UserPatch, apply_patch, parse_role};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, profile::Profile, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub struct CreateUserInput {
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: Option<String>,
}

pub struct ManageUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ManageUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, actor: Option<&Actor>, search: Option<&str>) -> AuthResult<Vec<User>> {
        authorize(actor, Action::ManageUsers)?;
        self.repo.list(search).await
    }

    pub async fn create(&self, actor: Option<&Actor>, input: CreateUserInput) -> AuthResult<User> {
        authorize(actor, Action::ManageUsers)?;

        let user_name = UserName::new(input.user_name)?;
        let email = Email::new(input.email)?;
        let profile = Profile::new(input.first_name, input.last_name, input.bio)?;
        let role = input.role.as_deref().map(parse_role).transpose()?;

        if self.repo.find_by_user_name(&user_name).await?.is_some() {
            return Err(AuthError::UserNameTaken);
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let mut user = User::new(user_name, email);
        user.set_profile(profile);
        if let Some(role) = role {
            user.set_role(role);
        }

        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            role = %user.role,
            "User created by admin"
        );
        Ok(user)
    }

    pub async fn get(&self, actor: Option<&Actor>, user_name: &str) -> AuthResult<User> {
        authorize(actor, Action::ManageUsers)?;
        self.find(user_name).await
    }

    pub async fn update(
        &self,
        actor: Option<&Actor>,
        user_name: &str,
        patch: UserPatch,
    ) -> AuthResult<User> {
        authorize(actor, Action::ManageUsers)?;
        let mut user = self.find(user_name).await?;
        apply_patch(self.repo.as_ref(), &mut user, patch).await?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User updated by admin");
        Ok(user)
    }

    pub async fn delete(&self, actor: Option<&Actor>, user_name: &str) -> AuthResult<()> {
        authorize(actor, Action::ManageUsers)?;
        let user = self.find(user_name).await?;
        self.repo.delete(&user.user_id).await?;

        tracing::info!(user_id = %user.user_id, user_name = %user.user_name, "User deleted");
        Ok(())
    }

    async fn find(&self, user_name: &str) -> AuthResult<User> {
        let user_name = UserName::new(user_name).map_err(|_| AuthError::UserNotFound)?;
        self.repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
