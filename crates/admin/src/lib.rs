//! Admin-authoring client for the Team United content service.
//!
//! - [`client`] -- signs in against the HTTP API and exposes each content
//!   table as a [`teamunited_db::store::Table`].
//! - [`editor`] -- the add/edit/delete form over one table.
//! - [`client_state`] -- theme and session persisted between runs.

pub mod client;
pub mod client_state;
pub mod editor;
pub mod error;

pub use client::{ApiClient, RemoteTable};
pub use client_state::{ClientState, SavedAuth, Theme};
pub use editor::{Editor, Mode, SaveOutcome};
pub use error::{AdminError, AdminResult};
