//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::access::AccessDenied;
use kernel::error::conversions::{violated_foreign_key, violated_unique_constraint};
use kernel::id::{CommentId, ReviewId, TitleId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::comment::Comment;
use crate::domain::entity::post::Post;
use crate::domain::entity::review::Review;
use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::domain::value_object::{post_text::PostText, score::Score};
use crate::error::{ReviewError, ReviewResult};

const AUTHOR_TITLE_KEY: &str = "reviews_author_title_key";

/// Post write that referenced a row deleted since it was checked
fn dangling_post_reference(constraint: &str) -> Option<ReviewError> {
    match constraint {
        "reviews_title_fkey" => Some(ReviewError::TitleNotFound),
        "comments_review_fkey" => Some(ReviewError::ReviewNotFound),
        // Account deleted mid-request
        "reviews_author_fkey" | "comments_author_fkey" => {
            Some(AccessDenied::AuthenticationRequired.into())
        }
        _ => None,
    }
}

fn map_post_write_error(err: sqlx::Error) -> ReviewError {
    if violated_unique_constraint(&err) == Some(AUTHOR_TITLE_KEY) {
        // Lost the race against a concurrent review by the same author
        return ReviewError::DuplicateReview;
    }
    match violated_foreign_key(&err).and_then(dangling_post_reference) {
        Some(mapped) => mapped,
        None => ReviewError::Database(err),
    }
}

const REVIEW_SELECT: &str = r#"
    SELECT r.id, r.title_id, r.author_id, u.username AS author_name, r.text, r.score, r.pub_date
    FROM reviews r
    JOIN users u ON u.id = r.author_id
"#;

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.review_id, c.author_id, u.username AS author_name, c.text, c.pub_date
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

/// PostgreSQL-backed review and comment repository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for PgReviewRepository {
    async fn title_exists(&self, title_id: &TitleId) -> ReviewResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM titles WHERE id = $1)")
            .bind(title_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn create_review(&self, review: &Review) -> ReviewResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, title_id, author_id, text, score, pub_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.review_id.as_uuid())
        .bind(review.title_id.as_uuid())
        .bind(review.post.author_id.as_uuid())
        .bind(review.post.text.as_str())
        .bind(review.score.value())
        .bind(review.post.pub_date)
        .execute(&self.pool)
        .await
        .map_err(map_post_write_error)?;

        Ok(())
    }

    async fn find_review(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewResult<Option<Review>> {
        let sql = format!("{REVIEW_SELECT} WHERE r.title_id = $1 AND r.id = $2");
        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(title_id.as_uuid())
            .bind(review_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ReviewRow::into_review))
    }

    async fn find_review_by_author(
        &self,
        title_id: &TitleId,
        author_id: &UserId,
    ) -> ReviewResult<Option<Review>> {
        let sql = format!("{REVIEW_SELECT} WHERE r.title_id = $1 AND r.author_id = $2");
        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(title_id.as_uuid())
            .bind(author_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ReviewRow::into_review))
    }

    async fn list_reviews(&self, title_id: &TitleId) -> ReviewResult<Vec<Review>> {
        let sql = format!("{REVIEW_SELECT} WHERE r.title_id = $1 ORDER BY r.pub_date, r.id");
        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(title_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ReviewRow::into_review).collect())
    }

    async fn update_review(&self, review: &Review) -> ReviewResult<()> {
        let result = sqlx::query("UPDATE reviews SET text = $2, score = $3 WHERE id = $1")
            .bind(review.review_id.as_uuid())
            .bind(review.post.text.as_str())
            .bind(review.score.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ReviewError::ReviewNotFound);
        }
        Ok(())
    }

    async fn delete_review(&self, review_id: &ReviewId) -> ReviewResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn title_scores(&self, title_id: &TitleId) -> ReviewResult<Vec<i16>> {
        let scores = sqlx::query_scalar("SELECT score FROM reviews WHERE title_id = $1")
            .bind(title_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(scores)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgReviewRepository {
    async fn create_comment(&self, comment: &Comment) -> ReviewResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, review_id, author_id, text, pub_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.review_id.as_uuid())
        .bind(comment.post.author_id.as_uuid())
        .bind(comment.post.text.as_str())
        .bind(comment.post.pub_date)
        .execute(&self.pool)
        .await
        .map_err(map_post_write_error)?;

        Ok(())
    }

    async fn find_comment(
        &self,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewResult<Option<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.review_id = $1 AND c.id = $2");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(review_id.as_uuid())
            .bind(comment_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_comments(&self, review_id: &ReviewId) -> ReviewResult<Vec<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.review_id = $1 ORDER BY c.pub_date, c.id");
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(review_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn update_comment(&self, comment: &Comment) -> ReviewResult<()> {
        let result = sqlx::query("UPDATE comments SET text = $2 WHERE id = $1")
            .bind(comment.comment_id.as_uuid())
            .bind(comment.post.text.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ReviewError::CommentNotFound);
        }
        Ok(())
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> ReviewResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    title_id: Uuid,
    author_id: Uuid,
    author_name: String,
    text: String,
    score: i16,
    pub_date: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            review_id: ReviewId::from_uuid(self.id),
            title_id: TitleId::from_uuid(self.title_id),
            post: Post {
                author_id: UserId::from_uuid(self.author_id),
                author_name: self.author_name,
                text: PostText::from_db(self.text),
                pub_date: self.pub_date,
            },
            score: Score::from_db(self.score),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    review_id: Uuid,
    author_id: Uuid,
    author_name: String,
    text: String,
    pub_date: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.id),
            review_id: ReviewId::from_uuid(self.review_id),
            post: Post {
                author_id: UserId::from_uuid(self.author_id),
                author_name: self.author_name,
                text: PostText::from_db(self.text),
                pub_date: self.pub_date,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanished_parents_map_to_not_found() {
        assert!(matches!(
            dangling_post_reference("reviews_title_fkey"),
            Some(ReviewError::TitleNotFound)
        ));
        assert!(matches!(
            dangling_post_reference("comments_review_fkey"),
            Some(ReviewError::ReviewNotFound)
        ));
    }

    #[test]
    fn test_vanished_author_is_unauthenticated() {
        for constraint in ["reviews_author_fkey", "comments_author_fkey"] {
            let err = dangling_post_reference(constraint).unwrap();
            assert_eq!(err.to_app_error().status_code(), 401);
        }
        assert!(dangling_post_reference("titles_category_fkey").is_none());
    }

    #[test]
    fn test_other_failures_stay_database_errors() {
        assert!(matches!(
            map_post_write_error(sqlx::Error::PoolTimedOut),
            ReviewError::Database(_)
        ));
    }
}
