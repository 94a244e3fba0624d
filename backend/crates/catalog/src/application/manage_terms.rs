//! Manage Terms Use Case
//!
//! Categories and genres: open reads, admin-only writes.

use std::sync::Arc;

use kernel::access::{Action, Actor, authorize};

use crate::domain::entity::term::{Term, TermKind};
use crate::domain::repository::TermRepository;
use crate::domain::value_object::{catalog_name::CatalogName, slug::Slug};
use crate::error::{CatalogError, CatalogResult};

pub struct TermInput {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct TermPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct ManageTermsUseCase<R>
where
    R: TermRepository,
{
    repo: Arc<R>,
    kind: TermKind,
}

impl<R> ManageTermsUseCase<R>
where
    R: TermRepository,
{
    pub fn new(repo: Arc<R>, kind: TermKind) -> Self {
        Self { repo, kind }
    }

    pub async fn list(&self, search: Option<&str>) -> CatalogResult<Vec<Term>> {
        self.repo.list_terms(self.kind, search).await
    }

    pub async fn get(&self, slug: &str) -> CatalogResult<Term> {
        let slug = Slug::new(slug).map_err(|_| CatalogError::TermNotFound(self.kind))?;
        self.repo
            .find_term(self.kind, &slug)
            .await?
            .ok_or(CatalogError::TermNotFound(self.kind))
    }

    pub async fn create(&self, actor: Option<&Actor>, input: TermInput) -> CatalogResult<Term> {
        authorize(actor, Action::WriteCatalog)?;

        let term = Term::new(CatalogName::new(input.name)?, Slug::new(input.slug)?);
        if self.repo.find_term(self.kind, &term.slug).await?.is_some() {
            return Err(CatalogError::SlugTaken(self.kind));
        }
        self.repo.create_term(self.kind, &term).await?;

        tracing::info!(kind = self.kind.label(), slug = %term.slug, "Term created");
        Ok(term)
    }

    pub async fn update(
        &self,
        actor: Option<&Actor>,
        slug: &str,
        patch: TermPatch,
    ) -> CatalogResult<Term> {
        authorize(actor, Action::WriteCatalog)?;

        let mut term = self.get(slug).await?;
        let name = patch.name.map(CatalogName::new).transpose()?;
        let new_slug = patch
            .slug
            .map(Slug::new)
            .transpose()?
            .filter(|s| *s != term.slug);

        if let Some(new_slug) = &new_slug {
            if self.repo.find_term(self.kind, new_slug).await?.is_some() {
                return Err(CatalogError::SlugTaken(self.kind));
            }
        }

        if let Some(name) = name {
            term.name = name;
        }
        if let Some(new_slug) = new_slug {
            term.slug = new_slug;
        }
        self.repo.update_term(self.kind, &term).await?;

        tracing::info!(kind = self.kind.label(), slug = %term.slug, "Term updated");
        Ok(term)
    }

    pub async fn delete(&self, actor: Option<&Actor>, slug: &str) -> CatalogResult<()> {
        authorize(actor, Action::WriteCatalog)?;

        let term = self.get(slug).await?;
        if !self.repo.delete_term(self.kind, &term.slug).await? {
            return Err(CatalogError::TermNotFound(self.kind));
        }

        tracing::info!(kind = self.kind.label(), slug = %term.slug, "Term deleted");
        Ok(())
    }
}
