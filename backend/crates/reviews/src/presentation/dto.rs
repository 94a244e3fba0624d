//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::comment::Comment;
use crate::domain::entity::review::Review;

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub text: String,
    /// Author's username
    pub author: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.review_id.into_uuid(),
            text: review.post.text.to_string(),
            author: review.post.author_name.clone(),
            score: review.score.value(),
            pub_date: review.post.pub_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub score: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
    pub score: Option<i64>,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            text: comment.post.text.to_string(),
            author: comment.post.author_name.clone(),
            pub_date: comment.post.pub_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
}
