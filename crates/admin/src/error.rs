use teamunited_core::error::CoreError;
use teamunited_db::store::StoreError;

/// Errors surfaced to the authoring UI.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Local validation, a missing record, or a rejected login.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The Content Store (or the API in front of it) failed the call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `save` was called with no add or edit in progress.
    #[error("Nothing to save: start adding or editing a record first")]
    NotEditing,

    #[error("Client state I/O error: {0}")]
    StateIo(#[from] std::io::Error),

    #[error("Client state encoding error: {0}")]
    StateEncoding(#[from] serde_json::Error),
}

pub type AdminResult<T> = Result<T, AdminError>;
