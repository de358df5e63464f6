//! Pure domain logic for the Team United content service.
//!
//! Nothing in this crate performs I/O. The database layer, the HTTP API and
//! the admin-authoring client all build on these types and validators.

pub mod content;
pub mod error;
pub mod gate;
pub mod listing;
pub mod roles;
pub mod submission;
pub mod types;
pub mod validation;
