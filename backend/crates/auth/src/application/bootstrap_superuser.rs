//! Bootstrap Superuser Use Case
//!
//! Ensures a configured account exists with the superuser flag at startup.
//! The account signs in like everyone else (signup with the same pair,
//! then token exchange).

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub struct BootstrapSuperuserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> BootstrapSuperuserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_name: &str, email: &str) -> AuthResult<User> {
        let user_name = UserName::new(user_name)?;
        let email = Email::new(email)?;

        match self.repo.find_by_user_name(&user_name).await? {
            Some(mut user) => {
                if user.email != email {
                    return Err(AuthError::EmailTaken);
                }
                if !user.is_superuser {
                    user.grant_superuser();
                    self.repo.update(&user).await?;
                    tracing::info!(user_name = %user.user_name, "Existing user promoted to superuser");
                }
                Ok(user)
            }
            None => {
                if self.repo.find_by_email(&email).await?.is_some() {
                    return Err(AuthError::EmailTaken);
                }
                let mut user = User::new(user_name, email);
                user.grant_superuser();
                self.repo.create(&user).await?;
                tracing::info!(user_name = %user.user_name, "Superuser created");
                Ok(user)
            }
        }
    }
}
