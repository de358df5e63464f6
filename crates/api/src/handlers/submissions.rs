//! Handlers for public form submissions and the admin inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use teamunited_core::submission::{PublicForm, SubmissionKind};
use teamunited_core::types::{DbId, Timestamp};
use teamunited_db::models::submission::{CreateSubmission, Submission};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SubmissionListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// What a public submitter gets back: proof of receipt, not their data.
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub id: DbId,
    pub kind: String,
    pub created_at: Timestamp,
}

/// POST /api/v1/submissions/{partner|volunteer|story|contact}
///
/// Instantiated once per form type, e.g. `post(submissions::submit::<ContactMessage>)`.
pub async fn submit<F>(
    State(state): State<AppState>,
    Json(form): Json<F>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmissionReceipt>>)>
where
    F: PublicForm + DeserializeOwned + Send + 'static,
{
    form.validate()?;
    let input = CreateSubmission::from_form(&form)?;
    let submission = state.store.submissions.create(&input).await?;

    tracing::info!(
        submission_id = submission.id,
        kind = %submission.kind,
        "Public submission received"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionReceipt {
                id: submission.id,
                kind: submission.kind,
                created_at: submission.created_at,
            },
        }),
    ))
}

/// GET /api/v1/admin/submissions?kind=&limit=&offset=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<Json<DataResponse<Vec<Submission>>>> {
    let kind = params.kind_filter().map(SubmissionKind::parse).transpose()?;
    let rows = state
        .store
        .submissions
        .list(kind.map(SubmissionKind::as_str), &params.pagination())
        .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// DELETE /api/v1/admin/submissions/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = state.store.submissions.delete(id).await?;
    tracing::info!(submission_id = id, removed, deleted_by = %admin.subject, "Submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
