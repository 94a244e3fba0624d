//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::mail::{ConfiguredMailer, Mailer};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::ActorResolverState;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, mailer: ConfiguredMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository and mailer
///
/// Routes, relative to the API prefix:
/// - `POST /auth/signup`, `POST /auth/token`
/// - `GET|PATCH /users/me`
/// - `GET|POST /users`, `GET|PATCH|DELETE /users/{username}`
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R, M>))
        .route("/auth/token", post(handlers::obtain_token::<R, M>))
        .route(
            "/users/me",
            get(handlers::get_me::<R, M>).patch(handlers::update_me::<R, M>),
        )
        .route(
            "/users",
            get(handlers::list_users::<R, M>).post(handlers::create_user::<R, M>),
        )
        .route(
            "/users/{username}",
            get(handlers::get_user::<R, M>)
                .patch(handlers::update_user::<R, M>)
                .delete(handlers::delete_user::<R, M>),
        )
        .with_state(state)
}

/// State for [`crate::presentation::middleware::resolve_actor`]
pub fn actor_resolver_state<R>(repo: R, config: AuthConfig) -> ActorResolverState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    ActorResolverState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    }
}
