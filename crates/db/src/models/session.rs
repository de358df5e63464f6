//! Admin session model and DTOs.

use sqlx::FromRow;
use teamunited_core::types::{DbId, Timestamp};

/// A row from the `admin_sessions` table.
///
/// One row per issued session token, keyed by the token's `jti` claim.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub token_id: String,
    /// Login identifier (email, or the fallback username).
    pub subject: String,
    /// `None` for fallback-credential sessions.
    pub admin_user_id: Option<DbId>,
    pub is_admin: bool,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl AdminSession {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub token_id: String,
    pub subject: String,
    pub admin_user_id: Option<DbId>,
    pub is_admin: bool,
    pub expires_at: Timestamp,
}
