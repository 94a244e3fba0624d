//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::access::AccessDenied;
use kernel::error::conversions::storage_fault_kind;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entity::term::TermKind;
use crate::domain::value_object::{
    catalog_name::CatalogNameError, release_year::ReleaseYearError, slug::SlugError,
};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Slug already used by another term of the same kind
    #[error("{} with this slug already exists", .0.label())]
    SlugTaken(TermKind),

    /// Title write referenced a slug that does not exist
    #[error("{} with slug \"{slug}\" does not exist", .kind.label())]
    UnknownTerm { kind: TermKind, slug: String },

    /// Term deleted between slug resolution and the title write
    #[error("{} was removed while the title was being saved", .0.label())]
    TermRemoved(TermKind),

    #[error("{} not found", .0.label())]
    TermNotFound(TermKind),

    #[error("Title not found")]
    TitleNotFound,

    /// Policy denial
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation { .. }
            | CatalogError::SlugTaken(_)
            | CatalogError::UnknownTerm { .. }
            | CatalogError::TermRemoved(_) => ErrorKind::BadRequest,
            CatalogError::TermNotFound(_) | CatalogError::TitleNotFound => ErrorKind::NotFound,
            CatalogError::AccessDenied(denied) => denied.kind(),
            CatalogError::Database(e) => storage_fault_kind(e),
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            CatalogError::Validation { field, .. } => Some(*field),
            CatalogError::SlugTaken(_) => Some("slug"),
            CatalogError::UnknownTerm { kind, .. } | CatalogError::TermRemoved(kind) => {
                Some(kind.title_field())
            }
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        if let CatalogError::AccessDenied(denied) = self {
            return AppError::from(*denied);
        }

        let err = AppError::new(self.kind(), self.to_string());
        match self.field() {
            Some(field) => err.with_field(field),
            None => err,
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::AccessDenied(denied) => {
                tracing::warn!(reason = %denied, "Catalog write refused");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<SlugError> for CatalogError {
    fn from(err: SlugError) -> Self {
        CatalogError::validation("slug", err.to_string())
    }
}

impl From<CatalogNameError> for CatalogError {
    fn from(err: CatalogNameError) -> Self {
        CatalogError::validation("name", err.to_string())
    }
}

impl From<ReleaseYearError> for CatalogError {
    fn from(err: ReleaseYearError) -> Self {
        CatalogError::validation("year", err.to_string())
    }
}
