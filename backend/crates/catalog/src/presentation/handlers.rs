//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::access::CurrentActor;
use kernel::body::JsonBody;
use kernel::id::TitleId;
use kernel::query::non_blank;
use std::sync::Arc;

use crate::application::{
    ManageTermsUseCase, ManageTitlesUseCase, TermInput, TermPatch, TitleInput, TitlePatch,
};
use crate::domain::entity::term::TermKind;
use crate::domain::repository::{TermRepository, TitleRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CreateTermRequest, CreateTitleRequest, TermListQuery, TermResponse, TitleListQuery,
    TitleResponse, UpdateTermRequest, UpdateTitleRequest,
};

/// State for one term vocabulary (categories or genres)
pub struct TermAppState<R>
where
    R: TermRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub kind: TermKind,
}

impl<R> Clone for TermAppState<R>
where
    R: TermRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            kind: self.kind,
        }
    }
}

/// State for title handlers
pub struct TitleAppState<R>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for TitleAppState<R>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// A path id that is not a UUID names no title
fn parse_title_id(raw: &str) -> CatalogResult<TitleId> {
    raw.parse().map_err(|_| CatalogError::TitleNotFound)
}

// ============================================================================
// Categories / Genres
// ============================================================================

/// GET /categories, GET /genres
pub async fn list_terms<R>(
    State(state): State<TermAppState<R>>,
    Query(query): Query<TermListQuery>,
) -> CatalogResult<Json<Vec<TermResponse>>>
where
    R: TermRepository + Send + Sync + 'static,
{
    let terms = ManageTermsUseCase::new(state.repo.clone(), state.kind)
        .list(non_blank(query.search.as_deref()))
        .await?;
    Ok(Json(terms.iter().map(TermResponse::from).collect()))
}

/// POST /categories, POST /genres
pub async fn create_term<R>(
    State(state): State<TermAppState<R>>,
    actor: CurrentActor,
    JsonBody(req): JsonBody<CreateTermRequest>,
) -> CatalogResult<(StatusCode, Json<TermResponse>)>
where
    R: TermRepository + Send + Sync + 'static,
{
    let term = ManageTermsUseCase::new(state.repo.clone(), state.kind)
        .create(
            actor.actor(),
            TermInput {
                name: req.name,
                slug: req.slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(TermResponse::from(&term))))
}

/// GET /categories/{slug}, GET /genres/{slug}
pub async fn get_term<R>(
    State(state): State<TermAppState<R>>,
    Path(slug): Path<String>,
) -> CatalogResult<Json<TermResponse>>
where
    R: TermRepository + Send + Sync + 'static,
{
    let term = ManageTermsUseCase::new(state.repo.clone(), state.kind)
        .get(&slug)
        .await?;
    Ok(Json(TermResponse::from(&term)))
}

/// PATCH /categories/{slug}, PATCH /genres/{slug}
pub async fn update_term<R>(
    State(state): State<TermAppState<R>>,
    actor: CurrentActor,
    Path(slug): Path<String>,
    JsonBody(req): JsonBody<UpdateTermRequest>,
) -> CatalogResult<Json<TermResponse>>
where
    R: TermRepository + Send + Sync + 'static,
{
    let patch = TermPatch {
        name: req.name,
        slug: req.slug,
    };
    let term = ManageTermsUseCase::new(state.repo.clone(), state.kind)
        .update(actor.actor(), &slug, patch)
        .await?;
    Ok(Json(TermResponse::from(&term)))
}

/// DELETE /categories/{slug}, DELETE /genres/{slug}
pub async fn delete_term<R>(
    State(state): State<TermAppState<R>>,
    actor: CurrentActor,
    Path(slug): Path<String>,
) -> CatalogResult<StatusCode>
where
    R: TermRepository + Send + Sync + 'static,
{
    ManageTermsUseCase::new(state.repo.clone(), state.kind)
        .delete(actor.actor(), &slug)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Titles
// ============================================================================

/// GET /titles
pub async fn list_titles<R>(
    State(state): State<TitleAppState<R>>,
    Query(query): Query<TitleListQuery>,
) -> CatalogResult<Json<Vec<TitleResponse>>>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    let titles = ManageTitlesUseCase::new(state.repo.clone())
        .list(&query.into())
        .await?;
    Ok(Json(titles.iter().map(TitleResponse::from).collect()))
}

/// POST /titles
pub async fn create_title<R>(
    State(state): State<TitleAppState<R>>,
    actor: CurrentActor,
    JsonBody(req): JsonBody<CreateTitleRequest>,
) -> CatalogResult<(StatusCode, Json<TitleResponse>)>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    let input = TitleInput {
        name: req.name,
        year: req.year,
        description: req.description,
        category: req.category,
        genres: req.genre,
    };
    let title = ManageTitlesUseCase::new(state.repo.clone())
        .create(actor.actor(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(TitleResponse::from(&title))))
}

/// GET /titles/{title_id}
pub async fn get_title<R>(
    State(state): State<TitleAppState<R>>,
    Path(title_id): Path<String>,
) -> CatalogResult<Json<TitleResponse>>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    let title_id = parse_title_id(&title_id)?;
    let title = ManageTitlesUseCase::new(state.repo.clone())
        .get(&title_id)
        .await?;
    Ok(Json(TitleResponse::from(&title)))
}

/// PATCH /titles/{title_id}
pub async fn update_title<R>(
    State(state): State<TitleAppState<R>>,
    actor: CurrentActor,
    Path(title_id): Path<String>,
    JsonBody(req): JsonBody<UpdateTitleRequest>,
) -> CatalogResult<Json<TitleResponse>>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    let title_id = parse_title_id(&title_id)?;
    let patch = TitlePatch {
        name: req.name,
        year: req.year,
        description: req.description,
        category: req.category,
        genres: req.genre,
    };
    let title = ManageTitlesUseCase::new(state.repo.clone())
        .update(actor.actor(), &title_id, patch)
        .await?;
    Ok(Json(TitleResponse::from(&title)))
}

/// DELETE /titles/{title_id}
pub async fn delete_title<R>(
    State(state): State<TitleAppState<R>>,
    actor: CurrentActor,
    Path(title_id): Path<String>,
) -> CatalogResult<StatusCode>
where
    R: TermRepository + TitleRepository + Send + Sync + 'static,
{
    let title_id = parse_title_id(&title_id)?;
    ManageTitlesUseCase::new(state.repo.clone())
        .delete(actor.actor(), &title_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
