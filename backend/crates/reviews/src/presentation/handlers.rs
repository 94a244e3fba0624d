//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::access::CurrentActor;
use kernel::body::JsonBody;
use kernel::id::{CommentId, ReviewId, TitleId};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::{ManageCommentsUseCase, ManageReviewsUseCase, ReviewInput, ReviewPatch};
use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::error::{ReviewError, ReviewResult};
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, CreateReviewRequest, ReviewResponse,
    UpdateCommentRequest, UpdateReviewRequest,
};

/// Shared state for review and comment handlers
pub struct ReviewAppState<R>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for ReviewAppState<R>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// Path ids that are not UUIDs name nothing
fn parse_id<T: FromStr>(raw: &str, missing: ReviewError) -> ReviewResult<T> {
    raw.parse().map_err(|_| missing)
}

fn title_id(raw: &str) -> ReviewResult<TitleId> {
    parse_id(raw, ReviewError::TitleNotFound)
}

fn review_id(raw: &str) -> ReviewResult<ReviewId> {
    parse_id(raw, ReviewError::ReviewNotFound)
}

fn comment_id(raw: &str) -> ReviewResult<CommentId> {
    parse_id(raw, ReviewError::CommentNotFound)
}

// ============================================================================
// Reviews
// ============================================================================

/// GET /titles/{title_id}/reviews
pub async fn list_reviews<R>(
    State(state): State<ReviewAppState<R>>,
    Path(title): Path<String>,
) -> ReviewResult<Json<Vec<ReviewResponse>>>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let reviews = ManageReviewsUseCase::new(state.repo.clone())
        .list(&title_id(&title)?)
        .await?;
    Ok(Json(reviews.iter().map(ReviewResponse::from).collect()))
}

/// POST /titles/{title_id}/reviews
pub async fn create_review<R>(
    State(state): State<ReviewAppState<R>>,
    actor: CurrentActor,
    Path(title): Path<String>,
    JsonBody(req): JsonBody<CreateReviewRequest>,
) -> ReviewResult<(StatusCode, Json<ReviewResponse>)>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let input = ReviewInput {
        text: req.text,
        score: req.score,
    };
    let review = ManageReviewsUseCase::new(state.repo.clone())
        .create(actor.actor(), &title_id(&title)?, input)
        .await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(&review))))
}

/// GET /titles/{title_id}/reviews/{review_id}
pub async fn get_review<R>(
    State(state): State<ReviewAppState<R>>,
    Path((title, review)): Path<(String, String)>,
) -> ReviewResult<Json<ReviewResponse>>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let review = ManageReviewsUseCase::new(state.repo.clone())
        .get(&title_id(&title)?, &review_id(&review)?)
        .await?;
    Ok(Json(ReviewResponse::from(&review)))
}

/// PATCH /titles/{title_id}/reviews/{review_id}
pub async fn update_review<R>(
    State(state): State<ReviewAppState<R>>,
    actor: CurrentActor,
    Path((title, review)): Path<(String, String)>,
    JsonBody(req): JsonBody<UpdateReviewRequest>,
) -> ReviewResult<Json<ReviewResponse>>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let patch = ReviewPatch {
        text: req.text,
        score: req.score,
    };
    let review = ManageReviewsUseCase::new(state.repo.clone())
        .update(actor.actor(), &title_id(&title)?, &review_id(&review)?, patch)
        .await?;
    Ok(Json(ReviewResponse::from(&review)))
}

/// DELETE /titles/{title_id}/reviews/{review_id}
pub async fn delete_review<R>(
    State(state): State<ReviewAppState<R>>,
    actor: CurrentActor,
    Path((title, review)): Path<(String, String)>,
) -> ReviewResult<StatusCode>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    ManageReviewsUseCase::new(state.repo.clone())
        .delete(actor.actor(), &title_id(&title)?, &review_id(&review)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /titles/{title_id}/reviews/{review_id}/comments
pub async fn list_comments<R>(
    State(state): State<ReviewAppState<R>>,
    Path((title, review)): Path<(String, String)>,
) -> ReviewResult<Json<Vec<CommentResponse>>>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let comments = ManageCommentsUseCase::new(state.repo.clone())
        .list(&title_id(&title)?, &review_id(&review)?)
        .await?;
    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

/// POST /titles/{title_id}/reviews/{review_id}/comments
pub async fn create_comment<R>(
    State(state): State<ReviewAppState<R>>,
    actor: CurrentActor,
    Path((title, review)): Path<(String, String)>,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> ReviewResult<(StatusCode, Json<CommentResponse>)>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let comment = ManageCommentsUseCase::new(state.repo.clone())
        .create(
            actor.actor(),
            &title_id(&title)?,
            &review_id(&review)?,
            req.text,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// GET /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn get_comment<R>(
    State(state): State<ReviewAppState<R>>,
    Path((title, review, comment)): Path<(String, String, String)>,
) -> ReviewResult<Json<CommentResponse>>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let comment = ManageCommentsUseCase::new(state.repo.clone())
        .get(
            &title_id(&title)?,
            &review_id(&review)?,
            &comment_id(&comment)?,
        )
        .await?;
    Ok(Json(CommentResponse::from(&comment)))
}

/// PATCH /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn update_comment<R>(
    State(state): State<ReviewAppState<R>>,
    actor: CurrentActor,
    Path((title, review, comment)): Path<(String, String, String)>,
    JsonBody(req): JsonBody<UpdateCommentRequest>,
) -> ReviewResult<Json<CommentResponse>>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    let comment = ManageCommentsUseCase::new(state.repo.clone())
        .update(
            actor.actor(),
            &title_id(&title)?,
            &review_id(&review)?,
            &comment_id(&comment)?,
            req.text,
        )
        .await?;
    Ok(Json(CommentResponse::from(&comment)))
}

/// DELETE /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn delete_comment<R>(
    State(state): State<ReviewAppState<R>>,
    actor: CurrentActor,
    Path((title, review, comment)): Path<(String, String, String)>,
) -> ReviewResult<StatusCode>
where
    R: ReviewRepository + CommentRepository + Send + Sync + 'static,
{
    ManageCommentsUseCase::new(state.repo.clone())
        .delete(
            actor.actor(),
            &title_id(&title)?,
            &review_id(&review)?,
            &comment_id(&comment)?,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
