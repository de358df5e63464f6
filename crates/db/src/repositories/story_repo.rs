//! Repository for the `stories` table.

use sqlx::PgPool;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;

use crate::models::story::{CreateStory, Story, UpdateStory};

const COLUMNS: &str = "id, name, location, project, profile_image_url, quote, story, impact, \
                       created_at, updated_at";

/// Provides CRUD operations for impact stories.
pub struct StoryRepo;

impl StoryRepo {
    pub async fn create(pool: &PgPool, input: &CreateStory) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (name, location, project, profile_image_url, quote, story, impact)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.project)
            .bind(&input.profile_image_url)
            .bind(&input.quote)
            .bind(&input.story)
            .bind(&input.impact)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List stories newest first. Stories have no category column.
    pub async fn list(pool: &PgPool, params: &ListQuery) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(params.effective_limit())
            .bind(params.effective_offset())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                project = COALESCE($4, project),
                profile_image_url = COALESCE($5, profile_image_url),
                quote = COALESCE($6, quote),
                story = COALESCE($7, story),
                impact = COALESCE($8, impact),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.project)
            .bind(&input.profile_image_url)
            .bind(&input.quote)
            .bind(&input.story)
            .bind(&input.impact)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
