//! Obtain Token Use Case
//!
//! Exchanges a username and its pending confirmation code for an access
//! token. The code is consumed on success.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::CodeCheck;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

pub struct ObtainTokenInput {
    pub user_name: Option<String>,
    pub confirmation_code: Option<String>,
}

#[derive(Debug)]
pub struct ObtainTokenOutput {
    pub token: String,
}

pub struct ObtainTokenUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ObtainTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ObtainTokenInput) -> AuthResult<ObtainTokenOutput> {
        let raw_name = input
            .user_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AuthError::validation("username", "This field is required"))?;

        // A name that could never have been registered cannot exist
        let user_name = UserName::new(raw_name).map_err(|_| AuthError::UserNotFound)?;
        let mut user = self
            .repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let code = input
            .confirmation_code
            .filter(|code| !code.trim().is_empty())
            .ok_or(AuthError::ConfirmationCodeRequired)?;

        match user.redeem_confirmation_code(code.trim()) {
            CodeCheck::Accepted => {}
            CodeCheck::Mismatch | CodeCheck::NoPendingCode => {
                tracing::warn!(user_id = %user.user_id, "Confirmation code rejected");
                return Err(AuthError::InvalidConfirmationCode);
            }
        }

        self.repo.update(&user).await?;

        let token = self.config.token_signer().issue(user.user_id.into_uuid());

        tracing::info!(user_id = %user.user_id, user_name = %user.user_name, "Access token issued");

        Ok(ObtainTokenOutput { token })
    }
}
