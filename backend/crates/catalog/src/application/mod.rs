//! Application Layer
//!
//! Use cases and application services.

pub mod manage_terms;
pub mod manage_titles;

// Re-exports
pub use manage_terms::{ManageTermsUseCase, TermInput, TermPatch};
pub use manage_titles::{ManageTitlesUseCase, TitleInput, TitlePatch};
