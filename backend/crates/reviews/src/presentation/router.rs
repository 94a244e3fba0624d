//! Reviews Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::infra::postgres::PgReviewRepository;
use crate::presentation::handlers::{self, ReviewAppState};

/// Create the Reviews router with PostgreSQL repository
pub fn reviews_router(repo: PgReviewRepository) -> Router {
    reviews_router_generic(repo)
}

/// Create a generic Reviews router for any repository
///
/// Routes, relative to the API prefix:
/// - `GET|POST /titles/{title_id}/reviews`
/// - `GET|PATCH|DELETE /titles/{title_id}/reviews/{review_id}`
/// - `GET|POST .../reviews/{review_id}/comments`
/// - `GET|PATCH|DELETE .../reviews/{review_id}/comments/{comment_id}`
pub fn reviews_router_generic<R>(repo: R) -> Router
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let state = ReviewAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/titles/{title_id}/reviews",
            get(handlers::list_reviews::<R>).post(handlers::create_review::<R>),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}",
            get(handlers::get_review::<R>)
                .patch(handlers::update_review::<R>)
                .delete(handlers::delete_review::<R>),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments",
            get(handlers::list_comments::<R>).post(handlers::create_comment::<R>),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
            get(handlers::get_comment::<R>)
                .patch(handlers::update_comment::<R>)
                .delete(handlers::delete_comment::<R>),
        )
        .with_state(state)
}
