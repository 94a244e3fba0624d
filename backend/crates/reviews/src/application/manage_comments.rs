//! Manage Comments Use Case
//!
//! Comments under one review, addressed through its title.

use std::sync::Arc;

use kernel::access::{AccessDenied, Action, Actor, authorize};
use kernel::id::{CommentId, ReviewId, TitleId};

use crate::domain::entity::comment::Comment;
use crate::domain::entity::post::Post;
use crate::domain::entity::review::Review;
use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::domain::value_object::post_text::PostText;
use crate::error::{ReviewError, ReviewResult};

pub struct ManageCommentsUseCase<R>
where
    R: ReviewRepository + CommentRepository,
{
    repo: Arc<R>,
}

impl<R> ManageCommentsUseCase<R>
where
    R: ReviewRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewResult<Vec<Comment>> {
        let review = self.review(title_id, review_id).await?;
        self.repo.list_comments(&review.review_id).await
    }

    pub async fn get(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewResult<Comment> {
        let review = self.review(title_id, review_id).await?;
        self.repo
            .find_comment(&review.review_id, comment_id)
            .await?
            .ok_or(ReviewError::CommentNotFound)
    }

    pub async fn create(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        review_id: &ReviewId,
        text: String,
    ) -> ReviewResult<Comment> {
        authorize(actor, Action::CreatePost)?;
        let author = actor.ok_or(AccessDenied::AuthenticationRequired)?;

        let review = self.review(title_id, review_id).await?;
        let comment = Comment::new(review.review_id, Post::new(author, PostText::new(text)?));
        self.repo.create_comment(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            review_id = %review.review_id,
            author = %author.user_name,
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn update(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        review_id: &ReviewId,
        comment_id: &CommentId,
        text: Option<String>,
    ) -> ReviewResult<Comment> {
        authorize(actor, Action::CreatePost)?;
        let mut comment = self.get(title_id, review_id, comment_id).await?;
        authorize(
            actor,
            Action::ModifyPost {
                author: &comment.post.author_id,
            },
        )?;

        if let Some(text) = text {
            comment.post.set_text(PostText::new(text)?);
        }
        self.repo.update_comment(&comment).await?;

        tracing::info!(comment_id = %comment.comment_id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewResult<()> {
        authorize(actor, Action::CreatePost)?;
        let comment = self.get(title_id, review_id, comment_id).await?;
        authorize(
            actor,
            Action::ModifyPost {
                author: &comment.post.author_id,
            },
        )?;

        if !self.repo.delete_comment(&comment.comment_id).await? {
            return Err(ReviewError::CommentNotFound);
        }

        tracing::info!(comment_id = %comment.comment_id, "Comment deleted");
        Ok(())
    }

    /// The review, provided it belongs to the title
    async fn review(&self, title_id: &TitleId, review_id: &ReviewId) -> ReviewResult<Review> {
        self.repo
            .find_review(title_id, review_id)
            .await?
            .ok_or(ReviewError::ReviewNotFound)
    }
}
