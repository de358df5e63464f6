//! Shared query parameter types for API handlers.
//!
//! Content lists deserialize straight into
//! [`teamunited_core::listing::ListQuery`] (`?limit=&offset=&category=`).

use serde::Deserialize;
use teamunited_core::listing::ListQuery;

/// Query parameters for `GET /admin/submissions` (`?kind=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListParams {
    pub kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SubmissionListParams {
    /// The kind filter, ignoring a blank value.
    pub fn kind_filter(&self) -> Option<&str> {
        self.kind.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn pagination(&self) -> ListQuery {
        ListQuery {
            limit: self.limit,
            offset: self.offset,
            category: None,
        }
    }
}
