//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::TitleId;

use crate::domain::entity::term::{Term, TermKind};
use crate::domain::entity::title::{Title, TitleFilter, TitleRecord};
use crate::domain::value_object::slug::Slug;
use crate::error::CatalogResult;

/// Categories and genres
///
/// Writes report a taken slug as `CatalogError::SlugTaken`.
#[trait_variant::make(TermRepository: Send)]
pub trait LocalTermRepository {
    async fn create_term(&self, kind: TermKind, term: &Term) -> CatalogResult<()>;

    async fn find_term(&self, kind: TermKind, slug: &Slug) -> CatalogResult<Option<Term>>;

    /// Ordered by name, optionally filtered by a name substring
    async fn list_terms(&self, kind: TermKind, search: Option<&str>) -> CatalogResult<Vec<Term>>;

    async fn update_term(&self, kind: TermKind, term: &Term) -> CatalogResult<()>;

    /// Titles lose the category (set to none) or the genre link
    async fn delete_term(&self, kind: TermKind, slug: &Slug) -> CatalogResult<bool>;
}

/// Titles with their genre links
#[trait_variant::make(TitleRepository: Send)]
pub trait LocalTitleRepository {
    async fn create_title(&self, record: &TitleRecord) -> CatalogResult<()>;

    /// Replaces the genre set
    async fn update_title(&self, record: &TitleRecord) -> CatalogResult<()>;

    async fn find_title(&self, title_id: &TitleId) -> CatalogResult<Option<Title>>;

    /// Ordered by name
    async fn list_titles(&self, filter: &TitleFilter) -> CatalogResult<Vec<Title>>;

    /// Reviews (and their comments) go with it
    async fn delete_title(&self, title_id: &TitleId) -> CatalogResult<bool>;
}
