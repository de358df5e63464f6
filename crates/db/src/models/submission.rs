//! Public form submission model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamunited_core::error::CoreError;
use teamunited_core::submission::PublicForm;
use teamunited_core::types::{DbId, Timestamp};

/// A row from the `submissions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: DbId,
    /// One of `partner`, `volunteer`, `story`, `contact`.
    pub kind: String,
    pub name: String,
    pub email: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for inserting a submission.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub kind: String,
    pub name: String,
    pub email: String,
    pub payload: serde_json::Value,
}

impl CreateSubmission {
    /// Flatten a validated public form into a row.
    pub fn from_form<F: PublicForm>(form: &F) -> Result<Self, CoreError> {
        Ok(Self {
            kind: F::KIND.as_str().to_string(),
            name: form.submitter_name(),
            email: form.submitter_email().trim().to_string(),
            payload: form.to_payload()?,
        })
    }
}
