//! Sign Up Use Case
//!
//! Registers a user (or re-issues a code for an existing username/email
//! pair) and mails a fresh confirmation code.

use std::sync::Arc;

use platform::mail::{Envelope, Mailer};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub const CONFIRMATION_SUBJECT: &str = "Confirmation code";

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
}

/// Sign up output (never includes the code)
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_name: String,
    pub email: String,
}

/// Sign up use case
pub struct SignUpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> SignUpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name = UserName::new(input.user_name)?;
        let email = Email::new(input.email)?;

        let (mut user, is_new) = match self.repo.find_by_user_name(&user_name).await? {
            // Same pair again: re-issue
            Some(existing) if existing.email == email => (existing, false),
            Some(_) => return Err(AuthError::UserNameTaken),
            None => {
                if self.repo.find_by_email(&email).await?.is_some() {
                    return Err(AuthError::EmailTaken);
                }
                (User::new(user_name, email), true)
            }
        };

        let code = user.issue_confirmation_code();

        if is_new {
            self.repo.create(&user).await?;
        } else {
            self.repo.update(&user).await?;
        }

        let envelope = Envelope {
            from: self.config.mail_from.clone(),
            to: user.email.to_string(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            body: format!("Your confirmation code is: {}", code.as_str()),
        };
        self.mailer.send(&envelope).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            reissued = !is_new,
            "Confirmation code sent"
        );

        Ok(SignUpOutput {
            user_name: user.user_name.into_inner(),
            email: user.email.into_inner(),
        })
    }
}
