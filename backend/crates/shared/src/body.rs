//! JSON request bodies
//!
//! [`JsonBody`] is `axum::Json` with its rejection lowered into a 400
//! problem document. A missing or mistyped field names that field.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::{app_error::AppError, kind::ErrorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_error(&rejection)),
        }
    }
}

fn rejection_error(rejection: &JsonRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "Request body rejected");
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let reason = err.body_text();
            let reason = reason
                .split_once("target type: ")
                .map_or(reason.as_str(), |(_, rest)| rest);
            let err = AppError::new(ErrorKind::BadRequest, reason.to_string());
            match offending_field(reason) {
                Some(field) => err.with_field(field),
                None => err,
            }
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::new(ErrorKind::BadRequest, "Request body is not valid JSON")
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::new(ErrorKind::BadRequest, "Expected a JSON request body")
                .with_action("Send Content-Type: application/json")
        }
        _ => AppError::new(ErrorKind::BadRequest, "Request body could not be read"),
    }
}

/// Field named by a serde data error
///
/// `missing field `email` at ...` for absent fields, `score: invalid type ...`
/// for nested or mistyped ones.
fn offending_field(reason: &str) -> Option<String> {
    if let Some((_, rest)) = reason.split_once("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }
    let (path, _) = reason.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}
