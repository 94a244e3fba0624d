//! API DTOs (Data Transfer Objects)
//!
//! Title writes name terms by slug; title reads embed the terms.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::term::Term;
use crate::domain::entity::title::{Title, TitleFilter};

// ============================================================================
// Categories / Genres
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermResponse {
    pub name: String,
    pub slug: String,
}

impl From<&Term> for TermResponse {
    fn from(term: &Term) -> Self {
        Self {
            name: term.name.to_string(),
            slug: term.slug.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTermRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTermRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermListQuery {
    pub search: Option<String>,
}

// ============================================================================
// Titles
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleResponse {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub genre: Vec<TermResponse>,
    pub category: Option<TermResponse>,
    /// `null` until the title has reviews
    pub rating: Option<f64>,
}

impl From<&Title> for TitleResponse {
    fn from(title: &Title) -> Self {
        Self {
            id: title.title_id.into_uuid(),
            name: title.name.to_string(),
            year: title.year.value(),
            description: title.description.clone(),
            genre: title.genres.iter().map(TermResponse::from).collect(),
            category: title.category.as_ref().map(TermResponse::from),
            rating: title.rating.map(|r| r.value()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTitleRequest {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    /// Category slug
    pub category: Option<String>,
    /// Genre slugs
    #[serde(default)]
    pub genre: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTitleRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleListQuery {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub genre: Option<String>,
}

impl From<TitleListQuery> for TitleFilter {
    fn from(query: TitleListQuery) -> Self {
        let trimmed = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        TitleFilter {
            name: trimmed(query.name),
            year: query.year,
            category: trimmed(query.category),
            genre: trimmed(query.genre),
        }
    }
}
