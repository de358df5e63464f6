//! Handlers for `/admin/users` (admin only).
//!
//! Passwords arrive in plaintext, are checked for strength, and are stored
//! only as Argon2id hashes. Responses never include the hash.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use teamunited_core::error::CoreError;
use teamunited_core::types::DbId;
use teamunited_core::validation::Validate;
use teamunited_db::models::admin_user::{
    AdminUser, AdminUserChanges, CreateAdminUser, NewAdminUser, UpdateAdminUser,
};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AdminUser",
        id,
    })
}

/// Strength-check and hash a new password.
fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password).map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// GET /api/v1/admin/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdminUser>>>> {
    let rows = state.store.admin_users.list().await?;
    let users = rows.iter().map(AdminUser::from).collect();
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdminUser>>> {
    let row = state
        .store
        .admin_users
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: AdminUser::from(&row),
    }))
}

/// POST /api/v1/admin/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<NewAdminUser>,
) -> AppResult<(StatusCode, Json<DataResponse<AdminUser>>)> {
    input.normalize();
    input.validate()?;
    let password_hash = hash_new_password(&input.password)?;

    let row = state
        .store
        .admin_users
        .create(&CreateAdminUser {
            email: input.email,
            password_hash,
            is_admin: input.is_admin,
        })
        .await?;

    tracing::info!(
        admin_user_id = row.id,
        is_admin = row.is_admin,
        created_by = %admin.subject,
        "Admin user created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AdminUser::from(&row),
        }),
    ))
}

/// PUT /api/v1/admin/users/{id}
///
/// A missing or empty password keeps the current one. Changing the role or
/// the password ends the user's open sessions.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<AdminUserChanges>,
) -> AppResult<Json<DataResponse<AdminUser>>> {
    input.normalize();
    input.validate()?;
    let password_hash = input.new_password().map(hash_new_password).transpose()?;

    let current = state
        .store
        .admin_users
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let credentials_changed =
        password_hash.is_some() || input.is_admin.is_some_and(|v| v != current.is_admin);

    let row = state
        .store
        .admin_users
        .update(
            id,
            &UpdateAdminUser {
                email: input.email,
                password_hash,
                is_admin: input.is_admin,
            },
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(admin_user_id = id, updated_by = %admin.subject, "Admin user updated");

    if credentials_changed {
        let revoked = state.store.sessions.revoke_for_user(id).await?;
        tracing::info!(admin_user_id = id, revoked, "Sessions revoked after credential change");
    }

    Ok(Json(DataResponse {
        data: AdminUser::from(&row),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Also ends the user's sessions. Deleting a missing id answers 204.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = state.store.admin_users.delete(id).await?;
    tracing::info!(admin_user_id = id, removed, deleted_by = %admin.subject, "Admin user deleted");
    Ok(StatusCode::NO_CONTENT)
}
