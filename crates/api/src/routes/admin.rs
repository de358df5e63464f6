//! Route definitions for `/admin` (admin role only).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{admin_users, submissions};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET, POST         /users
/// GET, PUT, DELETE  /users/{id}
/// GET               /submissions
/// DELETE            /submissions/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin_users::list).post(admin_users::create))
        .route(
            "/users/{id}",
            get(admin_users::get_by_id)
                .put(admin_users::update)
                .delete(admin_users::delete),
        )
        .route("/submissions", get(submissions::list))
        .route("/submissions/{id}", delete(submissions::delete))
}
