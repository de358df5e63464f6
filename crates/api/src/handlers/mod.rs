//! Request handlers.
//!
//! - [`content`] -- generic CRUD over the four content tables.
//! - [`projects`] -- project-only extras.
//! - [`auth`] -- login, logout, session info.
//! - [`admin_users`] -- admin account management.
//! - [`submissions`] -- public forms and their admin inbox.
//! - [`health`] -- liveness and store reachability.

pub mod admin_users;
pub mod auth;
pub mod content;
pub mod health;
pub mod projects;
pub mod submissions;
