//! Auth Middleware
//!
//! Resolves the caller for every request. A request without an
//! `Authorization` header proceeds anonymously; a header that does not
//! carry a valid bearer token is rejected with 401.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::ResolveActorUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
pub struct ActorResolverState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for ActorResolverState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Inserts the resolved [`kernel::access::Actor`] into request extensions,
/// where [`kernel::access::CurrentActor`] picks it up.
pub async fn resolve_actor<R>(
    State(state): State<ActorResolverState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = match bearer_token(req.headers()) {
        Ok(Some(token)) => token.to_string(),
        Ok(None) => return next.run(req).await,
        Err(err) => return err.into_response(),
    };

    let use_case = ResolveActorUseCase::new(state.repo.clone(), state.config.clone());
    match use_case.execute(&token).await {
        Ok(actor) => {
            tracing::debug!(user_id = %actor.user_id, role = %actor.role, "Actor resolved");
            req.extensions_mut().insert(actor);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// `Ok(None)` when the header is absent
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(Some(token.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&HeaderMap::new()).unwrap(), None);
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc.def")).unwrap(), Some("abc.def"));
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers("Bearer")).is_err());
        assert!(bearer_token(&headers("Bearer   ")).is_err());
    }
}
