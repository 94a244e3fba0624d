//! Post
//!
//! What reviews and comments have in common: who wrote it, what it says,
//! and when it was published. The author and publication time never
//! change after creation.

use chrono::{DateTime, Utc};
use kernel::access::Actor;
use kernel::id::UserId;

use crate::domain::value_object::post_text::PostText;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub author_id: UserId,
    /// Resolved from the users table on read
    pub author_name: String,
    pub text: PostText,
    pub pub_date: DateTime<Utc>,
}

impl Post {
    /// A new post by `author`, published now
    pub fn new(author: &Actor, text: PostText) -> Self {
        Self {
            author_id: author.user_id,
            author_name: author.user_name.clone(),
            text,
            pub_date: Utc::now(),
        }
    }

    pub fn set_text(&mut self, text: PostText) {
        self.text = text;
    }
}
