//! Manage Reviews Use Case
//!
//! Reviews of one title. Anyone may read; any signed-in user may write one
//! review per title; the author, moderators and admins may edit or delete.

use std::sync::Arc;

use kernel::access::{AccessDenied, Action, Actor, authorize};
use kernel::id::{ReviewId, TitleId};
use kernel::rating::Rating;

use crate::domain::entity::post::Post;
use crate::domain::entity::review::Review;
use crate::domain::repository::ReviewRepository;
use crate::domain::value_object::{post_text::PostText, score::Score};
use crate::error::{ReviewError, ReviewResult};

pub struct ReviewInput {
    pub text: String,
    pub score: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub score: Option<i64>,
}

pub struct ManageReviewsUseCase<R>
where
    R: ReviewRepository,
{
    repo: Arc<R>,
}

impl<R> ManageReviewsUseCase<R>
where
    R: ReviewRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, title_id: &TitleId) -> ReviewResult<Vec<Review>> {
        self.ensure_title(title_id).await?;
        self.repo.list_reviews(title_id).await
    }

    pub async fn get(&self, title_id: &TitleId, review_id: &ReviewId) -> ReviewResult<Review> {
        self.repo
            .find_review(title_id, review_id)
            .await?
            .ok_or(ReviewError::ReviewNotFound)
    }

    pub async fn create(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        input: ReviewInput,
    ) -> ReviewResult<Review> {
        authorize(actor, Action::CreatePost)?;
        let author = actor.ok_or(AccessDenied::AuthenticationRequired)?;

        self.ensure_title(title_id).await?;
        let text = PostText::new(input.text)?;
        let score = Score::new(input.score)?;

        if self
            .repo
            .find_review_by_author(title_id, &author.user_id)
            .await?
            .is_some()
        {
            return Err(ReviewError::DuplicateReview);
        }

        let review = Review::new(*title_id, Post::new(author, text), score);
        self.repo.create_review(&review).await?;

        tracing::info!(
            review_id = %review.review_id,
            title_id = %title_id,
            author = %author.user_name,
            "Review created"
        );
        Ok(review)
    }

    pub async fn update(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        review_id: &ReviewId,
        patch: ReviewPatch,
    ) -> ReviewResult<Review> {
        authorize(actor, Action::CreatePost)?;
        let mut review = self.get(title_id, review_id).await?;
        authorize(
            actor,
            Action::ModifyPost {
                author: &review.post.author_id,
            },
        )?;

        let text = patch.text.map(PostText::new).transpose()?;
        let score = patch.score.map(Score::new).transpose()?;
        if let Some(text) = text {
            review.post.set_text(text);
        }
        if let Some(score) = score {
            review.score = score;
        }
        self.repo.update_review(&review).await?;

        tracing::info!(review_id = %review.review_id, "Review updated");
        Ok(review)
    }

    pub async fn delete(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewResult<()> {
        authorize(actor, Action::CreatePost)?;
        let review = self.get(title_id, review_id).await?;
        authorize(
            actor,
            Action::ModifyPost {
                author: &review.post.author_id,
            },
        )?;

        if !self.repo.delete_review(&review.review_id).await? {
            return Err(ReviewError::ReviewNotFound);
        }

        tracing::info!(review_id = %review.review_id, "Review deleted");
        Ok(())
    }

    /// Mean score of the title's reviews; `None` without reviews
    pub async fn compute_rating(&self, title_id: &TitleId) -> ReviewResult<Option<Rating>> {
        self.ensure_title(title_id).await?;
        let scores = self.repo.title_scores(title_id).await?;
        Ok(Rating::mean(scores))
    }

    async fn ensure_title(&self, title_id: &TitleId) -> ReviewResult<()> {
        if self.repo.title_exists(title_id).await? {
            Ok(())
        } else {
            Err(ReviewError::TitleNotFound)
        }
    }
}
