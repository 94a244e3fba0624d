//! Manage Titles Use Case
//!
//! Titles: open reads with filters, admin-only writes. Writes name the
//! category and genres by slug.

use std::sync::Arc;

use kernel::access::{Action, Actor, authorize};
use kernel::id::TitleId;

use crate::domain::entity::term::{Term, TermKind};
use crate::domain::entity::title::{Title, TitleFilter, TitleRecord};
use crate::domain::repository::{TermRepository, TitleRepository};
use crate::domain::value_object::{
    catalog_name::CatalogName, release_year::ReleaseYear, slug::Slug,
};
use crate::error::{CatalogError, CatalogResult};

pub struct TitleInput {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genres: Vec<String>,
}

/// `None` leaves a field as it is; `genres` replaces the whole set
#[derive(Debug, Clone, Default)]
pub struct TitlePatch {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genres: Option<Vec<String>>,
}

pub struct ManageTitlesUseCase<R>
where
    R: TermRepository + TitleRepository,
{
    repo: Arc<R>,
}

impl<R> ManageTitlesUseCase<R>
where
    R: TermRepository + TitleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &TitleFilter) -> CatalogResult<Vec<Title>> {
        self.repo.list_titles(filter).await
    }

    pub async fn get(&self, title_id: &TitleId) -> CatalogResult<Title> {
        self.repo
            .find_title(title_id)
            .await?
            .ok_or(CatalogError::TitleNotFound)
    }

    pub async fn create(&self, actor: Option<&Actor>, input: TitleInput) -> CatalogResult<Title> {
        authorize(actor, Action::WriteCatalog)?;

        let name = CatalogName::new(input.name)?;
        let year = ReleaseYear::new(input.year)?;
        let category = match input.category {
            Some(slug) => Some(self.resolve(TermKind::Category, &slug).await?),
            None => None,
        };
        let genres = self.resolve_all(TermKind::Genre, &input.genres).await?;

        let record = TitleRecord {
            title_id: TitleId::new(),
            name,
            year,
            description: normalize_description(input.description),
            category_id: category.map(|c| c.id),
            genre_ids: genres.iter().map(|g| g.id).collect(),
        };
        self.repo.create_title(&record).await?;

        tracing::info!(title_id = %record.title_id, name = %record.name, "Title created");
        self.get(&record.title_id).await
    }

    pub async fn update(
        &self,
        actor: Option<&Actor>,
        title_id: &TitleId,
        patch: TitlePatch,
    ) -> CatalogResult<Title> {
        authorize(actor, Action::WriteCatalog)?;

        let mut record = self.get(title_id).await?.record();

        if let Some(name) = patch.name {
            record.name = CatalogName::new(name)?;
        }
        if let Some(year) = patch.year {
            record.year = ReleaseYear::new(year)?;
        }
        if let Some(description) = patch.description {
            record.description = normalize_description(Some(description));
        }
        if let Some(slug) = patch.category {
            record.category_id = Some(self.resolve(TermKind::Category, &slug).await?.id);
        }
        if let Some(slugs) = patch.genres {
            record.genre_ids = self
                .resolve_all(TermKind::Genre, &slugs)
                .await?
                .iter()
                .map(|g| g.id)
                .collect();
        }

        self.repo.update_title(&record).await?;

        tracing::info!(title_id = %record.title_id, "Title updated");
        self.get(title_id).await
    }

    pub async fn delete(&self, actor: Option<&Actor>, title_id: &TitleId) -> CatalogResult<()> {
        authorize(actor, Action::WriteCatalog)?;

        if !self.repo.delete_title(title_id).await? {
            return Err(CatalogError::TitleNotFound);
        }

        tracing::info!(title_id = %title_id, "Title deleted");
        Ok(())
    }

    async fn resolve(&self, kind: TermKind, raw: &str) -> CatalogResult<Term> {
        let unknown = || CatalogError::UnknownTerm {
            kind,
            slug: raw.to_string(),
        };
        let slug = Slug::new(raw).map_err(|_| unknown())?;
        self.repo.find_term(kind, &slug).await?.ok_or_else(unknown)
    }

    /// Resolve in order, dropping repeats
    async fn resolve_all(&self, kind: TermKind, raw: &[String]) -> CatalogResult<Vec<Term>> {
        let mut terms: Vec<Term> = Vec::with_capacity(raw.len());
        for slug in raw {
            let term = self.resolve(kind, slug).await?;
            if !terms.iter().any(|t| t.id == term.id) {
                terms.push(term);
            }
        }
        Ok(terms)
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
