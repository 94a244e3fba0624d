//! Application Layer
//!
//! Use cases and application services.

pub mod manage_comments;
pub mod manage_reviews;

// Re-exports
pub use manage_comments::ManageCommentsUseCase;
pub use manage_reviews::{ManageReviewsUseCase, ReviewInput, ReviewPatch};
