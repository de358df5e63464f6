//! Field-level validators shared by every input DTO.
//!
//! Each helper returns [`CoreError::Validation`] with a message naming the
//! offending field, so handlers can surface it verbatim.

use crate::error::CoreError;

/// Maximum length of a short text field (titles, names, locations).
pub const MAX_SHORT_TEXT: usize = 200;

/// Maximum length of a URL field.
pub const MAX_URL_LEN: usize = 2048;

/// Maximum length of long-form text (descriptions, stories).
pub const MAX_LONG_TEXT: usize = 20_000;

/// Input types that can check themselves before reaching the store.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;

    /// Canonicalize accepted spellings (trim, casing) before validation.
    fn normalize(&mut self) {}
}

/// Reject empty or whitespace-only values.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject values longer than `max` characters.
pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Non-blank short text (<= [`MAX_SHORT_TEXT`] chars).
pub fn validate_short_text(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_blank(field, value)?;
    max_chars(field, value, MAX_SHORT_TEXT)
}

/// Validate an email address: one `@`, non-empty local part, and a dotted domain.
pub fn validate_email(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    let invalid = || CoreError::Validation(format!("{field} must be a valid email address"));

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || value.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    max_chars(field, value, MAX_SHORT_TEXT)
}

/// Validate an image or website reference: absolute `http(s)` URL.
pub fn validate_url(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| {
            CoreError::Validation(format!("{field} must be an absolute http(s) URL"))
        })?;
    if rest.is_empty() || rest.starts_with('/') || value.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "{field} must be an absolute http(s) URL"
        )));
    }
    max_chars(field, value, MAX_URL_LEN)
}

/// Run `check` on an optional field only when it is present.
pub fn if_present<T: ?Sized>(
    value: Option<&T>,
    check: impl FnOnce(&T) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_values_are_rejected() {
        assert_matches!(require_non_blank("title", "   "), Err(CoreError::Validation(msg)) if msg.contains("title"));
        assert!(require_non_blank("title", "Clean Water").is_ok());
    }

    #[test]
    fn short_text_has_an_upper_bound() {
        let long = "x".repeat(MAX_SHORT_TEXT + 1);
        assert!(validate_short_text("name", &long).is_err());
        assert!(validate_short_text("name", &"x".repeat(MAX_SHORT_TEXT)).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("email", "a@x.com").is_ok());
        assert!(validate_email("email", "volunteer@team-united.org").is_ok());
        assert!(validate_email("email", "admin").is_err());
        assert!(validate_email("email", "@x.com").is_err());
        assert!(validate_email("email", "a@x").is_err());
        assert!(validate_email("email", "a@@x.com").is_err());
        assert!(validate_email("email", "a b@x.com").is_err());
    }

    #[test]
    fn urls_must_be_absolute_http() {
        assert!(validate_url("image_url", "https://images.example.org/a.jpg").is_ok());
        assert!(validate_url("image_url", "http://localhost:8080/x.png").is_ok());
        assert!(validate_url("image_url", "ftp://x.org/a").is_err());
        assert!(validate_url("image_url", "/relative/path.png").is_err());
        assert!(validate_url("image_url", "https://").is_err());
    }

    #[test]
    fn optional_fields_are_skipped_when_absent() {
        assert!(if_present(None::<&str>, |v| require_non_blank("x", v)).is_ok());
        assert!(if_present(Some(""), |v| require_non_blank("x", v)).is_err());
    }
}
