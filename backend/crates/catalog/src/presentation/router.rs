//! Catalog Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::entity::term::TermKind;
use crate::domain::repository::{TermRepository, TitleRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, TermAppState, TitleAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository) -> Router {
    catalog_router_generic(repo)
}

/// Create a generic Catalog router for any repository
///
/// Routes, relative to the API prefix:
/// - `GET|POST /categories`, `GET|PATCH|DELETE /categories/{slug}`
/// - `GET|POST /genres`, `GET|PATCH|DELETE /genres/{slug}`
/// - `GET|POST /titles`, `GET|PATCH|DELETE /titles/{title_id}`
pub fn catalog_router_generic<R>(repo: R) -> Router
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    let repo = Arc::new(repo);

    let titles = Router::new()
        .route(
            "/titles",
            get(handlers::list_titles::<R>).post(handlers::create_title::<R>),
        )
        .route(
            "/titles/{title_id}",
            get(handlers::get_title::<R>)
                .patch(handlers::update_title::<R>)
                .delete(handlers::delete_title::<R>),
        )
        .with_state(TitleAppState { repo: repo.clone() });

    titles
        .merge(term_routes(repo.clone(), TermKind::Category))
        .merge(term_routes(repo, TermKind::Genre))
}

fn term_routes<R>(repo: Arc<R>, kind: TermKind) -> Router
where
    R: TermRepository + Send + Sync + 'static,
{
    let collection = format!("/{}", kind.collection());
    let item = format!("{collection}/{{slug}}");

    Router::new()
        .route(
            &collection,
            get(handlers::list_terms::<R>).post(handlers::create_term::<R>),
        )
        .route(
            &item,
            get(handlers::get_term::<R>)
                .patch(handlers::update_term::<R>)
                .delete(handlers::delete_term::<R>),
        )
        .with_state(TermAppState { repo, kind })
}
