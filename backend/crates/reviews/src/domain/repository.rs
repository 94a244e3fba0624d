//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Lookups by id are scoped to the parent given alongside it; a review of
//! another title (or a comment on another review) is reported as absent.

use kernel::id::{CommentId, ReviewId, TitleId, UserId};

use crate::domain::entity::comment::Comment;
use crate::domain::entity::review::Review;
use crate::error::ReviewResult;

#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    async fn title_exists(&self, title_id: &TitleId) -> ReviewResult<bool>;

    /// A second review by the same author on the same title fails with
    /// `ReviewError::DuplicateReview`
    async fn create_review(&self, review: &Review) -> ReviewResult<()>;

    async fn find_review(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewResult<Option<Review>>;

    async fn find_review_by_author(
        &self,
        title_id: &TitleId,
        author_id: &UserId,
    ) -> ReviewResult<Option<Review>>;

    /// Oldest first
    async fn list_reviews(&self, title_id: &TitleId) -> ReviewResult<Vec<Review>>;

    /// Text and score only
    async fn update_review(&self, review: &Review) -> ReviewResult<()>;

    /// Comments go with it
    async fn delete_review(&self, review_id: &ReviewId) -> ReviewResult<bool>;

    async fn title_scores(&self, title_id: &TitleId) -> ReviewResult<Vec<i16>>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create_comment(&self, comment: &Comment) -> ReviewResult<()>;

    async fn find_comment(
        &self,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewResult<Option<Comment>>;

    /// Oldest first
    async fn list_comments(&self, review_id: &ReviewId) -> ReviewResult<Vec<Comment>>;

    /// Text only
    async fn update_comment(&self, comment: &Comment) -> ReviewResult<()>;

    async fn delete_comment(&self, comment_id: &CommentId) -> ReviewResult<bool>;
}
