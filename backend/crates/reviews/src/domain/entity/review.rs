//! Review Entity

use kernel::id::{ReviewId, TitleId};

use crate::domain::entity::post::Post;
use crate::domain::value_object::score::Score;

/// One per (author, title)
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: ReviewId,
    pub title_id: TitleId,
    pub post: Post,
    pub score: Score,
}

impl Review {
    pub fn new(title_id: TitleId, post: Post, score: Score) -> Self {
        Self {
            review_id: ReviewId::new(),
            title_id,
            post,
            score,
        }
    }
}
