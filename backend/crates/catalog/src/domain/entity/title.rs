//! Title Entity
//!
//! [`Title`] is the read model: terms resolved and the rating computed.
//! [`TitleRecord`] is what gets stored.

use kernel::id::TitleId;
use kernel::rating::Rating;
use uuid::Uuid;

use crate::domain::entity::term::Term;
use crate::domain::value_object::{catalog_name::CatalogName, release_year::ReleaseYear};

#[derive(Debug, Clone)]
pub struct Title {
    pub title_id: TitleId,
    pub name: CatalogName,
    pub year: ReleaseYear,
    pub description: Option<String>,
    /// `None` also after the category was deleted
    pub category: Option<Term>,
    /// Ordered by name
    pub genres: Vec<Term>,
    /// Mean review score; `None` without reviews
    pub rating: Option<Rating>,
}

impl Title {
    pub fn record(&self) -> TitleRecord {
        TitleRecord {
            title_id: self.title_id,
            name: self.name.clone(),
            year: self.year,
            description: self.description.clone(),
            category_id: self.category.as_ref().map(|c| c.id),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    pub title_id: TitleId,
    pub name: CatalogName,
    pub year: ReleaseYear,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

/// List filters; all present filters must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub year: Option<i32>,
    /// Category slug
    pub category: Option<String>,
    /// Genre slug
    pub genre: Option<String>,
}

impl TitleFilter {
    /// Whether `title` passes (used by in-memory stores)
    pub fn matches(&self, title: &Title) -> bool {
        let name_ok = self.name.as_ref().is_none_or(|needle| {
            title
                .name
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let year_ok = self.year.is_none_or(|year| title.year.value() == year);
        let category_ok = self.category.as_ref().is_none_or(|slug| {
            title
                .category
                .as_ref()
                .is_some_and(|c| c.slug.as_str() == slug)
        });
        let genre_ok = self
            .genre
            .as_ref()
            .is_none_or(|slug| title.genres.iter().any(|g| g.slug.as_str() == slug));

        name_ok && year_ok && category_ok && genre_ok
    }
}
