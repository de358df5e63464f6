//! Repository for the `gallery` table.

use sqlx::PgPool;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;

use crate::models::gallery::{
    normalize_hashtag, CreateGalleryItem, GalleryItem, UpdateGalleryItem,
};

const COLUMNS: &str = "id, title, image_url, hashtag, description, created_at, updated_at";

/// Provides CRUD operations for gallery items.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a new gallery item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery (title, image_url, hashtag, description)
             VALUES ($1, $2, NULLIF($3, ''), NULLIF($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.hashtag)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery WHERE id = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List gallery items newest first, optionally filtered by hashtag.
    pub async fn list(pool: &PgPool, params: &ListQuery) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery
             WHERE ($1::TEXT IS NULL OR hashtag = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(params.category_filter().and_then(normalize_hashtag))
            .bind(params.effective_limit())
            .bind(params.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Update a gallery item. Only non-`None` fields in `input` are applied;
    /// an empty `hashtag` or `description` sets the column to NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery SET
                title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                hashtag = CASE WHEN $4::TEXT IS NULL THEN hashtag ELSE NULLIF($4, '') END,
                description = CASE WHEN $5::TEXT IS NULL THEN description ELSE NULLIF($5, '') END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.hashtag)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
