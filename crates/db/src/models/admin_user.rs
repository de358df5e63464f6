//! Admin user model and DTOs.
//!
//! Two layers of DTOs exist here:
//! - [`NewAdminUser`] / [`AdminUserChanges`] carry a plaintext password and
//!   are what clients send over the wire.
//! - [`CreateAdminUser`] / [`UpdateAdminUser`] carry the Argon2id hash and
//!   are what the store persists. Hashing happens in the API layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamunited_core::error::CoreError;
use teamunited_core::types::{DbId, Timestamp};
use teamunited_core::validation::{if_present, require_non_blank, validate_email, Validate};

use crate::store::Record;

/// Name of the unique constraint on `admin_users.email`.
pub const UQ_ADMIN_USERS_EMAIL: &str = "uq_admin_users_email";

/// Full row from the `admin_users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AdminUser`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserRow {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe admin user representation (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&AdminUserRow> for AdminUser {
    fn from(row: &AdminUserRow) -> Self {
        Self {
            id: row.id,
            email: row.email.clone(),
            is_admin: row.is_admin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs (plaintext password)
// ---------------------------------------------------------------------------

/// Request body for creating an admin user.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdminUser {
    pub email: String,
    pub password: String,
    #[serde(default = "default_is_admin")]
    pub is_admin: bool,
}

fn default_is_admin() -> bool {
    true
}

/// New admin users default to full admin access.
impl Default for NewAdminUser {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            is_admin: true,
        }
    }
}

impl std::fmt::Debug for NewAdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAdminUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Request body for updating an admin user. A missing or empty password
/// keeps the current one.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminUserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl AdminUserChanges {
    /// The new password, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl std::fmt::Debug for AdminUserChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserChanges")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl From<NewAdminUser> for AdminUserChanges {
    fn from(draft: NewAdminUser) -> Self {
        Self {
            email: Some(draft.email),
            password: Some(draft.password).filter(|p| !p.is_empty()),
            is_admin: Some(draft.is_admin),
        }
    }
}

impl Validate for NewAdminUser {
    fn validate(&self) -> Result<(), CoreError> {
        validate_email("email", &self.email)?;
        require_non_blank("password", &self.password)
    }

    fn normalize(&mut self) {
        self.email = self.email.trim().to_string();
    }
}

impl Validate for AdminUserChanges {
    fn validate(&self) -> Result<(), CoreError> {
        if_present(self.email.as_deref(), |v| validate_email("email", v))
    }

    fn normalize(&mut self) {
        if let Some(email) = &mut self.email {
            *email = email.trim().to_string();
        }
    }
}

impl Record for AdminUser {
    type Create = NewAdminUser;
    type Update = AdminUserChanges;

    const TABLE: &'static str = "admin_users";
    const ENTITY: &'static str = "AdminUser";
    const ROUTE: &'static str = "admin/users";

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Passwords are never read back, so an edit draft starts blank.
    fn to_draft(&self) -> NewAdminUser {
        NewAdminUser {
            email: self.email.clone(),
            password: String::new(),
            is_admin: self.is_admin,
        }
    }
}

// ---------------------------------------------------------------------------
// Store DTOs (hashed password)
// ---------------------------------------------------------------------------

/// DTO for inserting an admin user row.
#[derive(Debug, Clone)]
pub struct CreateAdminUser {
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// DTO for updating an admin user row. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdminUser {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}
