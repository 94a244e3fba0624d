//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::access::AccessDenied;
use kernel::error::conversions::storage_fault_kind;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::mail::MailError;
use thiserror::Error;

use crate::domain::value_object::{
    email::EmailError, profile::ProfileError, user_name::UserNameError,
};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// User name belongs to another account
    #[error("A user with that username already exists")]
    UserNameTaken,

    /// Email belongs to another account
    #[error("A user with that email already exists")]
    EmailTaken,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Token request without a code
    #[error("Confirmation code is required")]
    ConfirmationCodeRequired,

    /// Submitted code does not match the pending one
    #[error("Invalid confirmation code")]
    InvalidConfirmationCode,

    /// Bearer token malformed, forged, expired, or its user is gone
    #[error("Invalid or expired access token")]
    InvalidToken,

    /// Policy denial
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Confirmation mail could not be delivered
    #[error("Could not send confirmation code: {0}")]
    Mail(#[from] MailError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation { .. }
            | AuthError::UserNameTaken
            | AuthError::EmailTaken
            | AuthError::ConfirmationCodeRequired
            | AuthError::InvalidConfirmationCode => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::AccessDenied(denied) => denied.kind(),
            AuthError::Mail(_) => ErrorKind::BadGateway,
            AuthError::Database(e) => storage_fault_kind(e),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AuthError::Validation { field, .. } => Some(*field),
            AuthError::UserNameTaken => Some("username"),
            AuthError::EmailTaken => Some("email"),
            AuthError::ConfirmationCodeRequired | AuthError::InvalidConfirmationCode => {
                Some("confirmation_code")
            }
            _ => None,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        if let AuthError::AccessDenied(denied) = self {
            return AppError::from(*denied);
        }

        let err = AppError::new(self.kind(), self.to_string());
        let err = match self.field() {
            Some(field) => err.with_field(field),
            None => err,
        };
        match self {
            AuthError::InvalidToken => err.with_action("Request a new token via /auth/token"),
            AuthError::InvalidConfirmationCode => {
                err.with_action("Sign up again with the same username and email to get a new code")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Mail(e) => {
                tracing::error!(error = %e, "Confirmation mail failed");
            }
            AuthError::InvalidConfirmationCode => {
                tracing::warn!("Invalid confirmation code submitted");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Invalid access token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::validation("username", err.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::validation("email", err.to_string())
    }
}

impl From<ProfileError> for AuthError {
    fn from(err: ProfileError) -> Self {
        AuthError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
