//! Well-known role name constants carried in session claims.

/// Full access: content, admin users, and submissions.
pub const ROLE_ADMIN: &str = "admin";
/// Content authoring only.
pub const ROLE_EDITOR: &str = "editor";

/// Resolve the role for an admin-user row's `is_admin` flag.
pub fn role_for(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_EDITOR
    }
}
