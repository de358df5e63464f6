//! Story (beneficiary testimonial) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamunited_core::error::CoreError;
use teamunited_core::types::{DbId, Timestamp};
use teamunited_core::validation::{
    if_present, max_chars, require_non_blank, validate_short_text, validate_url, Validate,
    MAX_LONG_TEXT,
};

use crate::store::{MemoryRecord, Record};

/// A row from the `stories` table.
///
/// `project` is free text and is not checked against the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Story {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub project: String,
    pub profile_image_url: String,
    pub quote: String,
    pub story: String,
    pub impact: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateStory {
    pub name: String,
    pub location: String,
    pub project: String,
    pub profile_image_url: String,
    pub quote: String,
    pub story: String,
    pub impact: String,
}

/// DTO for updating a story. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStory {
    pub name: Option<String>,
    pub location: Option<String>,
    pub project: Option<String>,
    pub profile_image_url: Option<String>,
    pub quote: Option<String>,
    pub story: Option<String>,
    pub impact: Option<String>,
}

impl From<CreateStory> for UpdateStory {
    fn from(draft: CreateStory) -> Self {
        Self {
            name: Some(draft.name),
            location: Some(draft.location),
            project: Some(draft.project),
            profile_image_url: Some(draft.profile_image_url),
            quote: Some(draft.quote),
            story: Some(draft.story),
            impact: Some(draft.impact),
        }
    }
}

fn validate_long(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_blank(field, value)?;
    max_chars(field, value, MAX_LONG_TEXT)
}

impl Validate for CreateStory {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("name", &self.name)?;
        validate_short_text("location", &self.location)?;
        validate_short_text("project", &self.project)?;
        validate_url("profile_image_url", &self.profile_image_url)?;
        validate_long("quote", &self.quote)?;
        validate_long("story", &self.story)?;
        validate_long("impact", &self.impact)
    }
}

impl Validate for UpdateStory {
    fn validate(&self) -> Result<(), CoreError> {
        if_present(self.name.as_deref(), |v| validate_short_text("name", v))?;
        if_present(self.location.as_deref(), |v| validate_short_text("location", v))?;
        if_present(self.project.as_deref(), |v| validate_short_text("project", v))?;
        if_present(self.profile_image_url.as_deref(), |v| {
            validate_url("profile_image_url", v)
        })?;
        if_present(self.quote.as_deref(), |v| validate_long("quote", v))?;
        if_present(self.story.as_deref(), |v| validate_long("story", v))?;
        if_present(self.impact.as_deref(), |v| validate_long("impact", v))
    }
}

impl Record for Story {
    type Create = CreateStory;
    type Update = UpdateStory;

    const TABLE: &'static str = "stories";
    const ENTITY: &'static str = "Story";
    const ROUTE: &'static str = "stories";

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn to_draft(&self) -> CreateStory {
        CreateStory {
            name: self.name.clone(),
            location: self.location.clone(),
            project: self.project.clone(),
            profile_image_url: self.profile_image_url.clone(),
            quote: self.quote.clone(),
            story: self.story.clone(),
            impact: self.impact.clone(),
        }
    }
}

impl MemoryRecord for Story {
    fn materialize(id: DbId, now: Timestamp, input: &CreateStory) -> Self {
        Self {
            id,
            name: input.name.clone(),
            location: input.location.clone(),
            project: input.project.clone(),
            profile_image_url: input.profile_image_url.clone(),
            quote: input.quote.clone(),
            story: input.story.clone(),
            impact: input.impact.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &UpdateStory, now: Timestamp) {
        let fields = [
            (&mut self.name, &input.name),
            (&mut self.location, &input.location),
            (&mut self.project, &input.project),
            (&mut self.profile_image_url, &input.profile_image_url),
            (&mut self.quote, &input.quote),
            (&mut self.story, &input.story),
            (&mut self.impact, &input.impact),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                field.clone_from(v);
            }
        }
        self.updated_at = now;
    }
}
