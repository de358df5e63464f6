//! Closed value sets and helpers for published content.
//!
//! The store does not enforce these sets; they are checked at the API
//! boundary so legacy rows with unexpected values still load.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Project categories
// ---------------------------------------------------------------------------

pub const CATEGORY_EDUCATION: &str = "Education";
pub const CATEGORY_TECHNOLOGY: &str = "Technology";
pub const CATEGORY_ENVIRONMENT: &str = "Environment";
pub const CATEGORY_CHARITY: &str = "Charity";

/// All valid project categories.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_EDUCATION,
    CATEGORY_TECHNOLOGY,
    CATEGORY_ENVIRONMENT,
    CATEGORY_CHARITY,
];

// ---------------------------------------------------------------------------
// Project status
// ---------------------------------------------------------------------------

pub const STATUS_ONGOING: &str = "Ongoing";
pub const STATUS_COMPLETED: &str = "Completed";

/// All valid project statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_ONGOING, STATUS_COMPLETED];

/// Placeholder image used when a new draft is started.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1509062522246-3755977927d7?w=800";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a project category against the known set.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if !VALID_CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "Invalid category '{}'. Valid categories: {}",
            category,
            VALID_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a project status against the known set.
///
/// Accepts the lowercase spelling the public site historically stored.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if normalize_status(status).is_none() {
        return Err(CoreError::Validation(format!(
            "Invalid status '{}'. Valid statuses: {}",
            status,
            VALID_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Map a status in any casing to its canonical spelling.
pub fn normalize_status(status: &str) -> Option<&'static str> {
    VALID_STATUSES
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(status.trim()))
}

/// Distinct category values in first-seen order.
///
/// Feeds the public filter bar, which lists categories newest project first.
pub fn distinct_categories<'a, I>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<String> = Vec::new();
    for category in categories {
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_pass() {
        for c in VALID_CATEGORIES {
            assert!(validate_category(c).is_ok());
        }
        assert!(validate_category("Sports").is_err());
        assert!(validate_category("education").is_err());
    }

    #[test]
    fn status_accepts_lowercase_legacy_values() {
        assert!(validate_status("Ongoing").is_ok());
        assert!(validate_status("completed").is_ok());
        assert_eq!(normalize_status("ongoing"), Some(STATUS_ONGOING));
        assert!(validate_status("paused").is_err());
    }

    #[test]
    fn distinct_categories_keep_first_seen_order() {
        let cats = distinct_categories(["Charity", "Education", "Charity", "Technology"]);
        assert_eq!(cats, vec!["Charity", "Education", "Technology"]);
        assert!(distinct_categories(std::iter::empty::<&str>()).is_empty());
    }
}
