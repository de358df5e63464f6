//! Generic handlers for the content tables (`/projects`, `/gallery`,
//! `/stories`, `/leaders`).
//!
//! Each route instantiates these with its record type, e.g.
//! `get(content::list::<Project>)`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use teamunited_core::error::CoreError;
use teamunited_core::listing::ListQuery;
use teamunited_core::types::DbId;
use teamunited_core::validation::Validate;
use teamunited_db::store::{ContentStore, HasTable, Record};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found<E: Record>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: E::ENTITY,
        id,
    })
}

/// GET /api/v1/{table}?limit=&offset=&category=
pub async fn list<E>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<E>>>>
where
    E: Record,
    ContentStore: HasTable<E>,
{
    query.ensure_filterable(E::TABLE, E::CATEGORY_COLUMN)?;
    let table = <ContentStore as HasTable<E>>::table(&state.store);
    let rows = table.list(&query).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{table}/{id}
pub async fn get_by_id<E>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<E>>>
where
    E: Record,
    ContentStore: HasTable<E>,
{
    let table = <ContentStore as HasTable<E>>::table(&state.store);
    let record = table.find_by_id(id).await?.ok_or_else(|| not_found::<E>(id))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/{table}
pub async fn create<E>(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(mut input): Json<E::Create>,
) -> AppResult<(StatusCode, Json<DataResponse<E>>)>
where
    E: Record,
    ContentStore: HasTable<E>,
{
    input.normalize();
    input.validate()?;

    let table = <ContentStore as HasTable<E>>::table(&state.store);
    let record = table.create(&input).await?;

    tracing::info!(
        table = E::TABLE,
        record_id = record.id(),
        subject = %user.subject,
        "Content record created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/{table}/{id}
///
/// Only fields present in the body are overwritten.
pub async fn update<E>(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<E::Update>,
) -> AppResult<Json<DataResponse<E>>>
where
    E: Record,
    ContentStore: HasTable<E>,
{
    input.normalize();
    input.validate()?;

    let table = <ContentStore as HasTable<E>>::table(&state.store);
    let record = table
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found::<E>(id))?;

    tracing::info!(
        table = E::TABLE,
        record_id = id,
        subject = %user.subject,
        "Content record updated"
    );

    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/{table}/{id}
///
/// Deleting an id that does not exist still answers 204.
pub async fn delete<E>(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode>
where
    E: Record,
    ContentStore: HasTable<E>,
{
    let table = <ContentStore as HasTable<E>>::table(&state.store);
    let removed = table.delete(id).await?;

    tracing::info!(
        table = E::TABLE,
        record_id = id,
        removed,
        subject = %user.subject,
        "Content record deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
