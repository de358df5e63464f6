//! Credential checks and server-side session bookkeeping.
//!
//! Login looks up the `admin_users` row first and only then the fallback
//! pair. Both paths verify with Argon2id, and every failure collapses into
//! the same generic 401.

use std::sync::OnceLock;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use teamunited_core::error::CoreError;
use teamunited_core::gate::{CredentialCheck, Principal};
use teamunited_core::types::DbId;
use teamunited_db::models::session::CreateSession;

use crate::auth::jwt::{generate_session_token, validate_token, IssuedToken};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A principal whose credentials checked out, plus its account row id.
#[derive(Debug, Clone)]
pub struct VerifiedLogin {
    pub principal: Principal,
    /// `None` for the fallback login.
    pub admin_user_id: Option<DbId>,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}

fn verify(secret: &str, hash: &str) -> AppResult<bool> {
    verify_password(secret, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

/// Hash verified when no account matches, so an unknown email costs the same
/// Argon2 work as a known one.
fn dummy_hash() -> AppResult<&'static str> {
    static DUMMY: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY.get() {
        return Ok(hash);
    }
    let hash = hash_password("no-such-account-placeholder")
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    Ok(DUMMY.get_or_init(|| hash))
}

/// Check `identifier`/`secret` against `admin_users`, then the fallback pair.
pub async fn check_credentials(
    state: &AppState,
    identifier: &str,
    secret: &str,
) -> AppResult<VerifiedLogin> {
    let mut account = None;
    let mut admin_user_id = None;

    match state.store.admin_users.find_by_email(identifier).await? {
        Some(row) => {
            if verify(secret, &row.password_hash)? {
                account = Some(row.is_admin);
                admin_user_id = Some(row.id);
            }
        }
        None => {
            verify(secret, dummy_hash()?)?;
        }
    }

    let fallback_matched = match (&account, &state.config.fallback) {
        (None, Some(fallback)) if fallback.username == identifier => {
            verify(secret, &fallback.password_hash)?
        }
        _ => false,
    };

    let principal =
        CredentialCheck::resolve(account, fallback_matched).into_principal(identifier)?;

    Ok(VerifiedLogin {
        principal,
        admin_user_id,
    })
}

/// Sign a session token for `login` and persist its session row.
pub async fn open_session(state: &AppState, login: &VerifiedLogin) -> AppResult<IssuedToken> {
    let issued = generate_session_token(
        &login.principal.identifier,
        &login.principal.role,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    state
        .store
        .sessions
        .create(&CreateSession {
            token_id: issued.claims.jti.clone(),
            subject: login.principal.identifier.clone(),
            admin_user_id: login.admin_user_id,
            is_admin: login.principal.is_admin(),
            expires_at: issued.expires_at,
        })
        .await?;

    Ok(issued)
}

/// Revoke the session behind the request's bearer token, if any.
///
/// Returns `true` if a live session was revoked. A missing, malformed or
/// already-invalid token is not an error.
pub async fn close_session(state: &AppState, headers: &HeaderMap) -> AppResult<bool> {
    let Ok(token) = bearer_token(headers) else {
        return Ok(false);
    };
    let Ok(claims) = validate_token(token, &state.config.jwt) else {
        return Ok(false);
    };
    Ok(state.store.sessions.revoke(&claims.jti).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_hash_is_a_real_hash_that_matches_nothing() {
        let hash = dummy_hash().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("teamunited2024", hash).unwrap());
        assert!(std::ptr::eq(hash, dummy_hash().unwrap()));
    }

    #[test]
    fn bearer_token_requires_the_scheme() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Token abc".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
