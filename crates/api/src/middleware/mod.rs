//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the session holder from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any live session (admin or editor).

pub mod auth;
pub mod rbac;
