//! Comment Entity

use kernel::id::{CommentId, ReviewId};

use crate::domain::entity::post::Post;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub review_id: ReviewId,
    pub post: Post,
}

impl Comment {
    pub fn new(review_id: ReviewId, post: Post) -> Self {
        Self {
            comment_id: CommentId::new(),
            review_id,
            post,
        }
    }
}
