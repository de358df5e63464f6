//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use teamunited_core::error::CoreError;
use teamunited_core::roles::role_for;
use teamunited_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::auth::session::bearer_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Session holder extracted from a Bearer token in the `Authorization` header.
///
/// The token must carry a valid signature and expiry, and its `jti` must
/// name a session that has not been revoked.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(subject = %user.subject, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Login identifier (email, or the fallback username).
    pub subject: String,
    /// `"admin"` or `"editor"`, from the session row.
    pub role: String,
    /// The token's `jti`.
    pub token_id: String,
    /// `None` for fallback sessions.
    pub admin_user_id: Option<DbId>,
}

impl AuthUser {
    async fn resolve(parts: &Parts, state: &AppState) -> AppResult<Self> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let session = state
            .store
            .sessions
            .find_active(&claims.jti)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Session has ended".into()))
            })?;

        Ok(AuthUser {
            subject: session.subject,
            role: role_for(session.is_admin).to_string(),
            token_id: session.token_id,
            admin_user_id: session.admin_user_id,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::resolve(parts, state).await
    }
}
