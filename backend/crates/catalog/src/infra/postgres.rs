//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use kernel::error::conversions::{violated_foreign_key, violated_unique_constraint};
use kernel::id::TitleId;
use kernel::query::{contains_pattern, non_blank};
use kernel::rating::Rating;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::term::{Term, TermKind};
use crate::domain::entity::title::{Title, TitleFilter, TitleRecord};
use crate::domain::repository::{TermRepository, TitleRepository};
use crate::domain::value_object::{
    catalog_name::CatalogName, release_year::ReleaseYear, slug::Slug,
};
use crate::error::{CatalogError, CatalogResult};

/// Table and slug constraint per term kind
const fn table(kind: TermKind) -> &'static str {
    match kind {
        TermKind::Category => "categories",
        TermKind::Genre => "genres",
    }
}

const fn slug_key(kind: TermKind) -> &'static str {
    match kind {
        TermKind::Category => "categories_slug_key",
        TermKind::Genre => "genres_slug_key",
    }
}

/// PostgreSQL-backed catalog repository (terms and titles)
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Genres per title, each list ordered by name
    async fn genres_for(&self, title_ids: &[Uuid]) -> CatalogResult<HashMap<Uuid, Vec<Term>>> {
        let rows = sqlx::query_as::<_, TitleGenreRow>(
            r#"
            SELECT tg.title_id, g.id, g.name, g.slug
            FROM title_genres tg
            JOIN genres g ON g.id = tg.genre_id
            WHERE tg.title_id = ANY($1)
            ORDER BY g.name, g.slug
            "#,
        )
        .bind(title_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_title: HashMap<Uuid, Vec<Term>> = HashMap::new();
        for row in rows {
            by_title.entry(row.title_id).or_default().push(Term {
                id: row.id,
                name: CatalogName::from_db(row.name),
                slug: Slug::from_db(row.slug),
            });
        }
        Ok(by_title)
    }

    async fn assemble(&self, rows: Vec<TitleRow>) -> CatalogResult<Vec<Title>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut genres = self.genres_for(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let title_genres = genres.remove(&row.id).unwrap_or_default();
                row.into_title(title_genres)
            })
            .collect())
    }
}

// ============================================================================
// Term Repository Implementation
// ============================================================================

impl TermRepository for PgCatalogRepository {
    async fn create_term(&self, kind: TermKind, term: &Term) -> CatalogResult<()> {
        let sql = format!("INSERT INTO {} (id, name, slug) VALUES ($1, $2, $3)", table(kind));
        sqlx::query(&sql)
            .bind(term.id)
            .bind(term.name.as_str())
            .bind(term.slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_term_write_error(kind, e))?;
        Ok(())
    }

    async fn find_term(&self, kind: TermKind, slug: &Slug) -> CatalogResult<Option<Term>> {
        let sql = format!("SELECT id, name, slug FROM {} WHERE slug = $1", table(kind));
        let row = sqlx::query_as::<_, TermRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(TermRow::into_term))
    }

    async fn list_terms(&self, kind: TermKind, search: Option<&str>) -> CatalogResult<Vec<Term>> {
        let sql = format!(
            "SELECT id, name, slug FROM {}
             WHERE $1::TEXT IS NULL OR name ILIKE $1
             ORDER BY name, slug",
            table(kind)
        );
        let rows = sqlx::query_as::<_, TermRow>(&sql)
            .bind(non_blank(search).map(contains_pattern))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(TermRow::into_term).collect())
    }

    async fn update_term(&self, kind: TermKind, term: &Term) -> CatalogResult<()> {
        let sql = format!("UPDATE {} SET name = $2, slug = $3 WHERE id = $1", table(kind));
        let result = sqlx::query(&sql)
            .bind(term.id)
            .bind(term.name.as_str())
            .bind(term.slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_term_write_error(kind, e))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::TermNotFound(kind));
        }
        Ok(())
    }

    async fn delete_term(&self, kind: TermKind, slug: &Slug) -> CatalogResult<bool> {
        // FK actions: titles.category_id SET NULL, title_genres CASCADE
        let sql = format!("DELETE FROM {} WHERE slug = $1", table(kind));
        let result = sqlx::query(&sql)
            .bind(slug.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_term_write_error(kind: TermKind, err: sqlx::Error) -> CatalogError {
    match violated_unique_constraint(&err) {
        Some(key) if key == slug_key(kind) => CatalogError::SlugTaken(kind),
        _ => CatalogError::Database(err),
    }
}

/// Title write that referenced a row deleted since it was resolved
fn dangling_title_reference(constraint: &str) -> Option<CatalogError> {
    match constraint {
        "titles_category_fkey" => Some(CatalogError::TermRemoved(TermKind::Category)),
        "title_genres_genre_fkey" => Some(CatalogError::TermRemoved(TermKind::Genre)),
        "title_genres_title_fkey" => Some(CatalogError::TitleNotFound),
        _ => None,
    }
}

fn map_title_write_error(err: sqlx::Error) -> CatalogError {
    match violated_foreign_key(&err).and_then(dangling_title_reference) {
        Some(mapped) => mapped,
        None => CatalogError::Database(err),
    }
}

// ============================================================================
// Title Repository Implementation
// ============================================================================

const TITLE_SELECT: &str = r#"
    SELECT
        t.id,
        t.name,
        t.year,
        t.description,
        c.id AS category_id,
        c.name AS category_name,
        c.slug AS category_slug,
        r.score_sum,
        r.score_count
    FROM titles t
    LEFT JOIN categories c ON c.id = t.category_id
    LEFT JOIN LATERAL (
        SELECT
            COALESCE(SUM(score), 0)::BIGINT AS score_sum,
            COUNT(*) AS score_count
        FROM reviews
        WHERE reviews.title_id = t.id
    ) r ON TRUE
"#;

impl TitleRepository for PgCatalogRepository {
    async fn create_title(&self, record: &TitleRecord) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO titles (id, name, year, description, category_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.title_id.as_uuid())
        .bind(record.name.as_str())
        .bind(record.year.value())
        .bind(record.description.as_deref())
        .bind(record.category_id)
        .execute(&mut *tx)
        .await
        .map_err(map_title_write_error)?;

        sqlx::query(
            r#"
            INSERT INTO title_genres (title_id, genre_id)
            SELECT $1, UNNEST($2::UUID[])
            "#,
        )
        .bind(record.title_id.as_uuid())
        .bind(&record.genre_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_title_write_error)?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_title(&self, record: &TitleRecord) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE titles SET
                name = $2,
                year = $3,
                description = $4,
                category_id = $5
            WHERE id = $1
            "#,
        )
        .bind(record.title_id.as_uuid())
        .bind(record.name.as_str())
        .bind(record.year.value())
        .bind(record.description.as_deref())
        .bind(record.category_id)
        .execute(&mut *tx)
        .await
        .map_err(map_title_write_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::TitleNotFound);
        }

        sqlx::query("DELETE FROM title_genres WHERE title_id = $1")
            .bind(record.title_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO title_genres (title_id, genre_id)
            SELECT $1, UNNEST($2::UUID[])
            "#,
        )
        .bind(record.title_id.as_uuid())
        .bind(&record.genre_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_title_write_error)?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_title(&self, title_id: &TitleId) -> CatalogResult<Option<Title>> {
        let sql = format!("{TITLE_SELECT} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TitleRow>(&sql)
            .bind(title_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_titles(&self, filter: &TitleFilter) -> CatalogResult<Vec<Title>> {
        let sql = format!(
            r#"{TITLE_SELECT}
            WHERE ($1::TEXT IS NULL OR t.name ILIKE $1)
              AND ($2::INT IS NULL OR t.year = $2)
              AND ($3::TEXT IS NULL OR c.slug = $3)
              AND ($4::TEXT IS NULL OR EXISTS (
                    SELECT 1
                    FROM title_genres tg
                    JOIN genres g ON g.id = tg.genre_id
                    WHERE tg.title_id = t.id AND g.slug = $4
              ))
            ORDER BY t.name, t.id"#
        );
        let rows = sqlx::query_as::<_, TitleRow>(&sql)
            .bind(non_blank(filter.name.as_deref()).map(contains_pattern))
            .bind(filter.year)
            .bind(non_blank(filter.category.as_deref()))
            .bind(non_blank(filter.genre.as_deref()))
            .fetch_all(&self.pool)
            .await?;

        self.assemble(rows).await
    }

    async fn delete_title(&self, title_id: &TitleId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(title_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TermRow {
    id: Uuid,
    name: String,
    slug: String,
}

impl TermRow {
    fn into_term(self) -> Term {
        Term {
            id: self.id,
            name: CatalogName::from_db(self.name),
            slug: Slug::from_db(self.slug),
        }
    }
}

#[derive(sqlx::FromRow)]
struct TitleGenreRow {
    title_id: Uuid,
    id: Uuid,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct TitleRow {
    id: Uuid,
    name: String,
    year: i32,
    description: Option<String>,
    category_id: Option<Uuid>,
    category_name: Option<String>,
    category_slug: Option<String>,
    score_sum: i64,
    score_count: i64,
}

impl TitleRow {
    fn into_title(self, genres: Vec<Term>) -> Title {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Term {
                id,
                name: CatalogName::from_db(name),
                slug: Slug::from_db(slug),
            }),
            _ => None,
        };

        Title {
            title_id: TitleId::from_uuid(self.id),
            name: CatalogName::from_db(self.name),
            year: ReleaseYear::from_db(self.year),
            description: self.description,
            category,
            genres,
            rating: Rating::from_aggregate(self.score_sum, self.score_count),
        }
    }
}
