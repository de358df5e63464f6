//! Public form submissions: partner and volunteer applications, shared
//! stories, and contact messages.
//!
//! Each form has its own typed payload with validation rules. Persisted
//! submissions keep the submitter's name and email as columns and the rest
//! of the form as a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{
    max_chars, require_non_blank, validate_email, validate_short_text, validate_url, Validate,
    MAX_LONG_TEXT,
};

/// Minimum length of a shared story body.
pub const MIN_STORY_CHARS: usize = 200;

/// Which public form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Partner,
    Volunteer,
    Story,
    Contact,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 4] = [
        SubmissionKind::Partner,
        SubmissionKind::Volunteer,
        SubmissionKind::Story,
        SubmissionKind::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::Partner => "partner",
            SubmissionKind::Volunteer => "volunteer",
            SubmissionKind::Story => "story",
            SubmissionKind::Contact => "contact",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid submission kind '{value}'. Valid kinds: partner, volunteer, story, contact"
                ))
            })
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated form, reduced to the columns every submission shares.
pub trait PublicForm: Validate + Serialize {
    const KIND: SubmissionKind;

    /// Display name of the submitter.
    fn submitter_name(&self) -> String;

    fn submitter_email(&self) -> &str;

    /// The full form as a JSON document for the `payload` column.
    fn to_payload(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(self)
            .map_err(|e| CoreError::Internal(format!("Failed to encode submission: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Partner application
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerApplication {
    pub organization_name: String,
    pub contact_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub organization_type: String,
    #[serde(default)]
    pub website: Option<String>,
    pub partnership_interest: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Validate for PartnerApplication {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("organization_name", &self.organization_name)?;
        validate_short_text("contact_name", &self.contact_name)?;
        validate_email("email", &self.email)?;
        validate_short_text("organization_type", &self.organization_type)?;
        validate_short_text("partnership_interest", &self.partnership_interest)?;
        if let Some(website) = self.website.as_deref().filter(|w| !w.trim().is_empty()) {
            validate_url("website", website)?;
        }
        if let Some(message) = &self.message {
            max_chars("message", message, MAX_LONG_TEXT)?;
        }
        Ok(())
    }
}

impl PublicForm for PartnerApplication {
    const KIND: SubmissionKind = SubmissionKind::Partner;

    fn submitter_name(&self) -> String {
        format!("{} ({})", self.contact_name.trim(), self.organization_name.trim())
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}

// ---------------------------------------------------------------------------
// Volunteer application
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    pub location: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub availability: String,
    #[serde(default)]
    pub experience: Option<String>,
    pub motivation: String,
}

impl Validate for VolunteerApplication {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("first_name", &self.first_name)?;
        validate_short_text("last_name", &self.last_name)?;
        validate_email("email", &self.email)?;
        validate_short_text("location", &self.location)?;
        validate_short_text("availability", &self.availability)?;
        require_non_blank("motivation", &self.motivation)?;
        max_chars("motivation", &self.motivation, MAX_LONG_TEXT)?;
        if self.interests.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one area of interest".into(),
            ));
        }
        for interest in &self.interests {
            validate_short_text("interests", interest)?;
        }
        Ok(())
    }
}

impl PublicForm for VolunteerApplication {
    const KIND: SubmissionKind = SubmissionKind::Volunteer;

    fn submitter_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}

// ---------------------------------------------------------------------------
// Shared story
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorySubmission {
    pub name: String,
    pub email: String,
    pub location: String,
    pub story_title: String,
    pub story_type: String,
    #[serde(default)]
    pub project_involvement: Option<String>,
    pub story: String,
    pub consent: bool,
}

impl Validate for StorySubmission {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("name", &self.name)?;
        validate_email("email", &self.email)?;
        validate_short_text("location", &self.location)?;
        validate_short_text("story_title", &self.story_title)?;
        validate_short_text("story_type", &self.story_type)?;
        if self.story.trim().chars().count() < MIN_STORY_CHARS {
            return Err(CoreError::Validation(format!(
                "story must be at least {MIN_STORY_CHARS} characters"
            )));
        }
        max_chars("story", &self.story, MAX_LONG_TEXT)?;
        if !self.consent {
            return Err(CoreError::Validation(
                "Consent is required to share a story".into(),
            ));
        }
        Ok(())
    }
}

impl PublicForm for StorySubmission {
    const KIND: SubmissionKind = SubmissionKind::Story;

    fn submitter_name(&self) -> String {
        self.name.trim().to_string()
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}

// ---------------------------------------------------------------------------
// Contact message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("name", &self.name)?;
        validate_email("email", &self.email)?;
        validate_short_text("subject", &self.subject)?;
        require_non_blank("message", &self.message)?;
        max_chars("message", &self.message, MAX_LONG_TEXT)
    }
}

impl PublicForm for ContactMessage {
    const KIND: SubmissionKind = SubmissionKind::Contact;

    fn submitter_name(&self) -> String {
        self.name.trim().to_string()
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}
