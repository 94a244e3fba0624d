//! Actor extractor
//!
//! The auth middleware resolves the bearer token and stores the [`Actor`]
//! in request extensions. Handlers in every crate read it back through
//! [`CurrentActor`]; a request without one is anonymous.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::access::actor::Actor;

#[derive(Debug, Clone, Default)]
pub struct CurrentActor(pub Option<Actor>);

impl CurrentActor {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentActor(parts.extensions.get::<Actor>().cloned()))
    }
}
