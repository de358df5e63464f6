//! Repository for the `leaders` table.

use sqlx::PgPool;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;

use crate::models::leader::{CreateLeader, Leader, UpdateLeader};

const COLUMNS: &str = "id, name, role, image_url, created_at, updated_at";

/// Provides CRUD operations for the leadership roster.
pub struct LeaderRepo;

impl LeaderRepo {
    pub async fn create(pool: &PgPool, input: &CreateLeader) -> Result<Leader, sqlx::Error> {
        let query = format!(
            "INSERT INTO leaders (name, role, image_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Leader>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Leader>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leaders WHERE id = $1");
        sqlx::query_as::<_, Leader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, params: &ListQuery) -> Result<Vec<Leader>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leaders
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Leader>(&query)
            .bind(params.effective_limit())
            .bind(params.effective_offset())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLeader,
    ) -> Result<Option<Leader>, sqlx::Error> {
        let query = format!(
            "UPDATE leaders SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Leader>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leaders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
