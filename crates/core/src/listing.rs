//! List query rules shared by every content table.
//!
//! Listing is always newest first (`created_at DESC, id DESC`). A query may
//! cap the number of rows (preview sections ask for the 3-4 most recent
//! items), skip rows, and filter on the table's category column.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum rows a single list call may return when a limit is given.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Rows shown by the gallery preview on the landing page.
pub const GALLERY_PREVIEW_LIMIT: i64 = 3;

/// Rows shown by the project and story previews on the landing page.
pub const PREVIEW_LIMIT: i64 = 4;

/// Parameters for a `list` call against a content table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub category: Option<String>,
}

impl ListQuery {
    /// Every row, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    /// The `n` most recent rows.
    pub fn latest(n: i64) -> Self {
        Self {
            limit: Some(n),
            ..Self::default()
        }
    }

    /// Restrict to rows whose category column equals `category`.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The row cap to apply, if any: clamped to `1..=MAX_LIST_LIMIT`.
    ///
    /// `None` means no cap.
    pub fn effective_limit(&self) -> Option<i64> {
        self.limit.map(|l| l.clamp(1, MAX_LIST_LIMIT))
    }

    /// Rows to skip; never negative.
    pub fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// The category filter with surrounding whitespace removed; blank means none.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Reject a category filter against a table with no category column.
    pub fn ensure_filterable(&self, table: &str, column: Option<&str>) -> Result<(), CoreError> {
        if column.is_none() && self.category_filter().is_some() {
            return Err(CoreError::Validation(format!(
                "Table '{table}' does not support category filtering"
            )));
        }
        Ok(())
    }

    /// Apply offset and limit to an already ordered sequence.
    pub fn paginate<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = rows.into_iter().skip(self.effective_offset() as usize);
        match self.effective_limit() {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}
