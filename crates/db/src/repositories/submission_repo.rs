//! Repository for the `submissions` table.

use sqlx::PgPool;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;

use crate::models::submission::{CreateSubmission, Submission};

const COLUMNS: &str = "id, kind, name, email, payload, created_at";

/// Provides insert, list and delete for public form submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSubmission) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (kind, name, email, payload)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(&input.kind)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// List submissions newest first, optionally restricted to one kind.
    pub async fn list(
        pool: &PgPool,
        kind: Option<&str>,
        params: &ListQuery,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE ($1::TEXT IS NULL OR kind = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(kind)
            .bind(params.effective_limit())
            .bind(params.effective_offset())
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
