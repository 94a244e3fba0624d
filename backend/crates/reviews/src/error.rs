//! Review Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::access::AccessDenied;
use kernel::error::conversions::storage_fault_kind;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::{post_text::EmptyTextError, score::ScoreError};

pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// Input failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Author already reviewed this title
    #[error("You have already reviewed this title")]
    DuplicateReview,

    #[error("Title not found")]
    TitleNotFound,

    #[error("Review not found")]
    ReviewNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Policy denial
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ReviewError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ReviewError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::Validation { .. } | ReviewError::DuplicateReview => ErrorKind::BadRequest,
            ReviewError::TitleNotFound
            | ReviewError::ReviewNotFound
            | ReviewError::CommentNotFound => ErrorKind::NotFound,
            ReviewError::AccessDenied(denied) => denied.kind(),
            ReviewError::Database(e) => storage_fault_kind(e),
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            ReviewError::Validation { field, .. } => Some(*field),
            ReviewError::DuplicateReview => Some("title"),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        if let ReviewError::AccessDenied(denied) = self {
            return AppError::from(*denied);
        }

        let err = AppError::new(self.kind(), self.to_string());
        let err = match self.field() {
            Some(field) => err.with_field(field),
            None => err,
        };
        match self {
            ReviewError::DuplicateReview => err.with_action("Edit your existing review instead"),
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            ReviewError::Database(e) => {
                tracing::error!(error = %e, "Review database error");
            }
            ReviewError::AccessDenied(denied) => {
                tracing::warn!(reason = %denied, "Post write refused");
            }
            _ => {
                tracing::debug!(error = %self, "Review error");
            }
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ScoreError> for ReviewError {
    fn from(err: ScoreError) -> Self {
        ReviewError::validation("score", err.to_string())
    }
}

impl From<EmptyTextError> for ReviewError {
    fn from(err: EmptyTextError) -> Self {
        ReviewError::validation("text", err.to_string())
    }
}
