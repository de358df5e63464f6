//! Project-only handlers.

use axum::extract::State;
use axum::Json;
use teamunited_core::content::distinct_categories;
use teamunited_core::listing::ListQuery;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/categories
///
/// Categories in use, in first-seen order over the newest-first listing.
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let projects = state.store.projects.list(&ListQuery::all()).await?;
    let categories = distinct_categories(projects.iter().map(|p| p.category.as_str()));
    Ok(Json(DataResponse { data: categories }))
}
