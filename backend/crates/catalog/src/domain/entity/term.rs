//! Category and Genre
//!
//! Both are a named, slug-addressed term; [`TermKind`] says which
//! vocabulary a term belongs to.

use uuid::Uuid;

use crate::domain::value_object::{catalog_name::CatalogName, slug::Slug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Category,
    Genre,
}

impl TermKind {
    /// Collection segment in URLs
    pub const fn collection(&self) -> &'static str {
        match self {
            TermKind::Category => "categories",
            TermKind::Genre => "genres",
        }
    }

    /// Field name a title uses for this kind
    pub const fn title_field(&self) -> &'static str {
        match self {
            TermKind::Category => "category",
            TermKind::Genre => "genre",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            TermKind::Category => "Category",
            TermKind::Genre => "Genre",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: Uuid,
    pub name: CatalogName,
    pub slug: Slug,
}

impl Term {
    pub fn new(name: CatalogName, slug: Slug) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
        }
    }
}
