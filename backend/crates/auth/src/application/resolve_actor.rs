//! Resolve Actor Use Case
//!
//! Turns a bearer token into the [`Actor`] for this request. The role is
//! read from the store each time, so a role change applies to tokens
//! already issued.

use std::sync::Arc;

use kernel::access::Actor;
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct ResolveActorUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResolveActorUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<Actor> {
        let claims = self.config.token_signer().verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            AuthError::InvalidToken
        })?;

        let user = self
            .repo
            .find_by_id(&UserId::from_uuid(claims.sub))
            .await?
            // Token outlived its user
            .ok_or(AuthError::InvalidToken)?;

        Ok(user.actor())
    }
}
