//! Handlers for the `/auth` resource (login, logout, session).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use teamunited_core::gate::{AuthMethod, Principal};
use teamunited_core::roles::ROLE_ADMIN;

use crate::auth::session::{check_credentials, close_session, open_session};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// `identifier` is an admin user's email, or the fallback username.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "username")]
    pub identifier: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub principal: Principal,
}

/// The caller's live session, for `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub identifier: String,
    pub role: String,
    pub is_admin: bool,
    pub method: AuthMethod,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with an email or the fallback username. Any failure answers
/// the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let identifier = input.identifier.as_str();

    let verified = match check_credentials(&state, identifier, &input.password).await {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(identifier = %identifier, "Failed login attempt");
            return Err(err);
        }
    };

    let issued = open_session(&state, &verified).await?;

    tracing::info!(
        identifier = %verified.principal.identifier,
        role = %verified.principal.role,
        method = ?verified.principal.method,
        "Login succeeded"
    );

    Ok(Json(DataResponse {
        data: LoginResponse {
            token: issued.token,
            expires_in: state.config.jwt.session_expiry_mins * 60,
            principal: verified.principal,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Always succeeds. Revokes the bearer token's session if there is one.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    if close_session(&state, &headers).await? {
        tracing::info!("Session revoked");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
pub async fn session(user: AuthUser) -> Json<DataResponse<SessionInfo>> {
    let is_admin = user.role == ROLE_ADMIN;
    let method = match user.admin_user_id {
        Some(_) => AuthMethod::Account,
        None => AuthMethod::Fallback,
    };
    Json(DataResponse {
        data: SessionInfo {
            identifier: user.subject,
            role: user.role,
            is_admin,
            method,
        },
    })
}
