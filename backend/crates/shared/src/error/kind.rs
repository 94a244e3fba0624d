//! Error Kind
//!
//! The closed set of failure classes the API reports, each pinned to one
//! HTTP status.

use serde::Serialize;

/// Failure class of an [`AppError`](super::app_error::AppError)
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::MethodNotAllowed.status_code(), 405);
/// assert_eq!(ErrorKind::NotFound.to_string(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Bad field value, duplicate username/email/slug/review, wrong confirmation code
    BadRequest,
    /// No bearer token, or one that fails verification
    Unauthorized,
    /// Signed in, but the role is too low
    Forbidden,
    NotFound,
    /// Changing one's own role through `/users/me`
    MethodNotAllowed,
    InternalServerError,
    /// Mail relay rejected or was unreachable
    BadGateway,
    /// Pool exhausted or the database is not accepting connections
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Reason phrase, also used as the problem `title`
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::MethodNotAllowed => "Method Not Allowed",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Details of these never reach the caller
    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_kinds_are_distinct_statuses() {
        let codes = [
            ErrorKind::Unauthorized.status_code(),
            ErrorKind::Forbidden.status_code(),
            ErrorKind::MethodNotAllowed.status_code(),
        ];
        assert_eq!(codes, [401, 403, 405]);
    }

    #[test]
    fn test_only_5xx_are_server_errors() {
        assert!(ErrorKind::BadGateway.is_server_error());
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert!(!ErrorKind::MethodNotAllowed.is_server_error());
        assert!(!ErrorKind::BadRequest.is_server_error());
    }

    #[test]
    fn test_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::MethodNotAllowed).unwrap();
        assert_eq!(json, "\"METHOD_NOT_ALLOWED\"");
    }
}
