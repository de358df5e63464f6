//! Repository for the `admin_users` table.

use sqlx::PgPool;
use teamunited_core::types::DbId;

use crate::models::admin_user::{AdminUserRow, CreateAdminUser, UpdateAdminUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, is_admin, created_at, updated_at";

/// Provides CRUD operations for admin users.
pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Insert a new admin user, returning the created row.
    ///
    /// A duplicate email fails with the `uq_admin_users_email` constraint.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdminUser,
    ) -> Result<AdminUserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (email, password_hash, is_admin)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUserRow>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find an admin user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminUserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE id = $1");
        sqlx::query_as::<_, AdminUserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin user by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<AdminUserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE email = $1");
        sqlx::query_as::<_, AdminUserRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all admin users, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AdminUserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, AdminUserRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an admin user. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdminUser,
    ) -> Result<Option<AdminUserRow>, sqlx::Error> {
        let query = format!(
            "UPDATE admin_users SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                is_admin = COALESCE($4, is_admin),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUserRow>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_optional(pool)
            .await
    }

    /// Delete an admin user. Their sessions go with them (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
