//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::term::{Term, TermKind};
pub use entity::title::{Title, TitleFilter, TitleRecord};
pub use repository::{TermRepository, TitleRepository};
