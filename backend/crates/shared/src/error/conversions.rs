//! Boundary conversions
//!
//! Storage errors in, RFC 7807 problem documents out.

#[cfg(feature = "axum")]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

/// Name of the unique constraint a write tripped over, if any.
///
/// Repositories match on it to report a lost uniqueness race as the same
/// domain error the up-front check would have raised.
#[cfg(feature = "sqlx")]
pub fn violated_unique_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => db_err.constraint(),
        _ => None,
    }
}

/// Name of the foreign key a write referenced through, if any.
///
/// A parent row deleted between the existence check and the insert shows up
/// here; repositories turn it back into the matching not-found error.
#[cfg(feature = "sqlx")]
pub fn violated_foreign_key(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => db_err.constraint(),
        _ => None,
    }
}

/// 503 when the database is unreachable or saturated, 500 otherwise
#[cfg(feature = "sqlx")]
pub fn storage_fault_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(code) if code.starts_with("53") || code.starts_with("57P") => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

#[cfg(feature = "axum")]
impl AppError {
    /// Problem document body (RFC 7807)
    pub fn problem(&self) -> serde_json::Value {
        let status = self.status_code();
        let detail = if self.kind().is_server_error() {
            self.kind().as_str()
        } else {
            self.message()
        };

        serde_json::json!({
            "type": format!("https://httpstatuses.io/{status}"),
            "title": self.kind().as_str(),
            "status": status,
            "detail": detail,
            "field": self.field(),
            "action": self.action(),
        })
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, axum::Json(self.problem())).into_response()
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "sqlx")]
    mod violations {
        use std::borrow::Cow;
        use std::error::Error as StdError;

        use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};

        use crate::error::conversions::{
            storage_fault_kind, violated_foreign_key, violated_unique_constraint,
        };
        use crate::error::kind::ErrorKind;

        /// Postgres error as the driver would report it
        #[derive(Debug)]
        struct ConstraintViolation {
            code: &'static str,
            constraint: &'static str,
        }

        impl std::fmt::Display for ConstraintViolation {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "violates constraint \"{}\"", self.constraint)
            }
        }

        impl StdError for ConstraintViolation {}

        impl DatabaseError for ConstraintViolation {
            fn message(&self) -> &str {
                "constraint violated"
            }

            fn code(&self) -> Option<Cow<'_, str>> {
                Some(Cow::Borrowed(self.code))
            }

            fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
                self
            }

            fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
                self
            }

            fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
                self
            }

            fn constraint(&self) -> Option<&str> {
                Some(self.constraint)
            }

            fn kind(&self) -> DbErrorKind {
                match self.code {
                    "23505" => DbErrorKind::UniqueViolation,
                    "23503" => DbErrorKind::ForeignKeyViolation,
                    _ => DbErrorKind::Other,
                }
            }
        }

        fn violation(code: &'static str, constraint: &'static str) -> sqlx::Error {
            sqlx::Error::Database(Box::new(ConstraintViolation { code, constraint }))
        }

        #[test]
        fn test_foreign_key_violation_names_its_constraint() {
            let err = violation("23503", "reviews_title_fkey");
            assert_eq!(violated_foreign_key(&err), Some("reviews_title_fkey"));
            assert_eq!(violated_unique_constraint(&err), None);
        }

        #[test]
        fn test_unique_violation_is_not_a_foreign_key() {
            let err = violation("23505", "users_email_key");
            assert_eq!(violated_unique_constraint(&err), Some("users_email_key"));
            assert_eq!(violated_foreign_key(&err), None);
        }

        #[test]
        fn test_constraint_violations_are_not_outages() {
            let err = violation("23503", "comments_review_fkey");
            assert_eq!(storage_fault_kind(&err), ErrorKind::InternalServerError);
            let err = violation("57P01", "none");
            assert_eq!(storage_fault_kind(&err), ErrorKind::ServiceUnavailable);
        }
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_non_database_errors_name_no_constraint() {
        assert!(super::violated_unique_constraint(&sqlx::Error::RowNotFound).is_none());
        assert!(super::violated_unique_constraint(&sqlx::Error::PoolTimedOut).is_none());
        assert!(super::violated_foreign_key(&sqlx::Error::RowNotFound).is_none());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_saturated_pool_is_unavailable() {
        use crate::error::kind::ErrorKind;

        assert_eq!(
            super::storage_fault_kind(&sqlx::Error::PoolTimedOut),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            super::storage_fault_kind(&sqlx::Error::RowNotFound),
            ErrorKind::InternalServerError
        );
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_server_errors_hide_their_message() {
        use crate::error::{app_error::AppError, kind::ErrorKind};

        let body = AppError::new(ErrorKind::InternalServerError, "pool exhausted").problem();
        assert_eq!(body["status"], 500);
        assert_eq!(body["detail"], "Internal Server Error");
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_client_errors_carry_field_and_detail() {
        use crate::error::app_error::AppError;

        let body = AppError::validation("year", "Year cannot be in the future").problem();
        assert_eq!(body["status"], 400);
        assert_eq!(body["field"], "year");
        assert_eq!(body["detail"], "Year cannot be in the future");
        assert!(body["action"].is_null());
    }
}
