//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamunited_core::content::{
    normalize_status, validate_category, validate_status, CATEGORY_EDUCATION, DEFAULT_IMAGE_URL,
    STATUS_ONGOING,
};
use teamunited_core::error::CoreError;
use teamunited_core::types::{Date, DbId, Timestamp};
use teamunited_core::validation::{
    if_present, max_chars, validate_short_text, validate_url, Validate, MAX_LONG_TEXT,
};

use crate::store::{MemoryRecord, Record};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub date: Date,
    pub image_url: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub date: Date,
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

/// A fresh draft: Education, ongoing, dated today, placeholder image.
impl Default for CreateProject {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            category: CATEGORY_EDUCATION.to_string(),
            status: STATUS_ONGOING.to_string(),
            date: chrono::Utc::now().date_naive(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            description: String::new(),
        }
    }
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub date: Option<Date>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl From<CreateProject> for UpdateProject {
    fn from(draft: CreateProject) -> Self {
        Self {
            title: Some(draft.title),
            location: Some(draft.location),
            category: Some(draft.category),
            status: Some(draft.status),
            date: Some(draft.date),
            image_url: Some(draft.image_url),
            description: Some(draft.description),
        }
    }
}

impl Validate for CreateProject {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("title", &self.title)?;
        validate_short_text("location", &self.location)?;
        validate_category(&self.category)?;
        validate_status(&self.status)?;
        validate_url("image_url", &self.image_url)?;
        max_chars("description", &self.description, MAX_LONG_TEXT)
    }

    fn normalize(&mut self) {
        if let Some(status) = normalize_status(&self.status) {
            self.status = status.to_string();
        }
    }
}

impl Validate for UpdateProject {
    fn validate(&self) -> Result<(), CoreError> {
        if_present(self.title.as_deref(), |v| validate_short_text("title", v))?;
        if_present(self.location.as_deref(), |v| validate_short_text("location", v))?;
        if_present(self.category.as_deref(), validate_category)?;
        if_present(self.status.as_deref(), validate_status)?;
        if_present(self.image_url.as_deref(), |v| validate_url("image_url", v))?;
        if_present(self.description.as_deref(), |v| {
            max_chars("description", v, MAX_LONG_TEXT)
        })
    }

    fn normalize(&mut self) {
        if let Some(status) = self.status.as_deref().and_then(normalize_status) {
            self.status = Some(status.to_string());
        }
    }
}

impl Record for Project {
    type Create = CreateProject;
    type Update = UpdateProject;

    const TABLE: &'static str = "projects";
    const ENTITY: &'static str = "Project";
    const ROUTE: &'static str = "projects";
    const CATEGORY_COLUMN: Option<&'static str> = Some("category");

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn to_draft(&self) -> CreateProject {
        CreateProject {
            title: self.title.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
            date: self.date,
            image_url: self.image_url.clone(),
            description: self.description.clone(),
        }
    }
}

impl MemoryRecord for Project {
    fn materialize(id: DbId, now: Timestamp, input: &CreateProject) -> Self {
        Self {
            id,
            title: input.title.clone(),
            location: input.location.clone(),
            category: input.category.clone(),
            status: input.status.clone(),
            date: input.date,
            image_url: input.image_url.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &UpdateProject, now: Timestamp) {
        if let Some(v) = &input.title {
            self.title = v.clone();
        }
        if let Some(v) = &input.location {
            self.location = v.clone();
        }
        if let Some(v) = &input.category {
            self.category = v.clone();
        }
        if let Some(v) = &input.status {
            self.status = v.clone();
        }
        if let Some(v) = input.date {
            self.date = v;
        }
        if let Some(v) = &input.image_url {
            self.image_url = v.clone();
        }
        if let Some(v) = &input.description {
            self.description = v.clone();
        }
        self.updated_at = now;
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}
