pub mod admin;
pub mod auth;
pub mod content;
pub mod health;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                          list (public), create (auth)
/// /projects/categories               distinct categories (public)
/// /projects/{id}                     get (public), update, delete (auth)
/// /gallery[/{id}]                    same shape as projects
/// /stories[/{id}]                    same shape as projects
/// /leaders[/{id}]                    same shape as projects
///
/// /auth/login                        login (public)
/// /auth/logout                       logout (public, revokes bearer session)
/// /auth/session                      current session (auth)
///
/// /submissions/partner               partner application (public)
/// /submissions/volunteer             volunteer application (public)
/// /submissions/story                 shared story (public)
/// /submissions/contact               contact message (public)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get, update, delete (admin only)
/// /admin/submissions                 list, ?kind= (admin only)
/// /admin/submissions/{id}            delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(content::router())
        .nest("/auth", auth::router())
        .nest("/submissions", submissions::router())
        .nest("/admin", admin::router())
}
