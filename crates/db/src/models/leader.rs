//! Leader (team member) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamunited_core::error::CoreError;
use teamunited_core::types::{DbId, Timestamp};
use teamunited_core::validation::{if_present, validate_short_text, validate_url, Validate};

use crate::store::{MemoryRecord, Record};

/// A row from the `leaders` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Leader {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateLeader {
    pub name: String,
    pub role: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLeader {
    pub name: Option<String>,
    pub role: Option<String>,
    pub image_url: Option<String>,
}

impl From<CreateLeader> for UpdateLeader {
    fn from(draft: CreateLeader) -> Self {
        Self {
            name: Some(draft.name),
            role: Some(draft.role),
            image_url: Some(draft.image_url),
        }
    }
}

impl Validate for CreateLeader {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("name", &self.name)?;
        validate_short_text("role", &self.role)?;
        validate_url("image_url", &self.image_url)
    }
}

impl Validate for UpdateLeader {
    fn validate(&self) -> Result<(), CoreError> {
        if_present(self.name.as_deref(), |v| validate_short_text("name", v))?;
        if_present(self.role.as_deref(), |v| validate_short_text("role", v))?;
        if_present(self.image_url.as_deref(), |v| validate_url("image_url", v))
    }
}

impl Record for Leader {
    type Create = CreateLeader;
    type Update = UpdateLeader;

    const TABLE: &'static str = "leaders";
    const ENTITY: &'static str = "Leader";
    const ROUTE: &'static str = "leaders";

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn to_draft(&self) -> CreateLeader {
        CreateLeader {
            name: self.name.clone(),
            role: self.role.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

impl MemoryRecord for Leader {
    fn materialize(id: DbId, now: Timestamp, input: &CreateLeader) -> Self {
        Self {
            id,
            name: input.name.clone(),
            role: input.role.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &UpdateLeader, now: Timestamp) {
        if let Some(v) = &input.name {
            self.name = v.clone();
        }
        if let Some(v) = &input.role {
            self.role = v.clone();
        }
        if let Some(v) = &input.image_url {
            self.image_url = v.clone();
        }
        self.updated_at = now;
    }
}
