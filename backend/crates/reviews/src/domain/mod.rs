//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::comment::Comment;
pub use entity::post::Post;
pub use entity::review::Review;
pub use repository::{CommentRepository, ReviewRepository};
