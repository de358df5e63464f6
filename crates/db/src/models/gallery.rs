//! Gallery item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamunited_core::error::CoreError;
use teamunited_core::types::{DbId, Timestamp};
use teamunited_core::validation::{
    if_present, max_chars, validate_short_text, validate_url, Validate, MAX_LONG_TEXT,
};

use crate::store::{MemoryRecord, Record};

/// A row from the `gallery` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
    pub hashtag: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new gallery item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateGalleryItem {
    pub title: String,
    pub image_url: String,
    pub hashtag: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a gallery item. All fields are optional.
///
/// For `hashtag` and `description`, a blank value clears the column; an
/// absent one leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub hashtag: Option<String>,
    pub description: Option<String>,
}

impl From<CreateGalleryItem> for UpdateGalleryItem {
    fn from(draft: CreateGalleryItem) -> Self {
        Self {
            title: Some(draft.title),
            image_url: Some(draft.image_url),
            hashtag: Some(draft.hashtag.unwrap_or_default()),
            description: Some(draft.description.unwrap_or_default()),
        }
    }
}

/// Store hashtags without the leading `#`; blank means none.
pub(crate) fn normalize_hashtag(tag: &str) -> Option<String> {
    let tag = tag.trim().trim_start_matches('#');
    (!tag.is_empty()).then(|| tag.to_string())
}

impl Validate for CreateGalleryItem {
    fn validate(&self) -> Result<(), CoreError> {
        validate_short_text("title", &self.title)?;
        validate_url("image_url", &self.image_url)?;
        if_present(self.hashtag.as_deref(), |v| validate_short_text("hashtag", v))?;
        if_present(self.description.as_deref(), |v| {
            max_chars("description", v, MAX_LONG_TEXT)
        })
    }

    fn normalize(&mut self) {
        self.hashtag = self.hashtag.as_deref().and_then(normalize_hashtag);
    }
}

impl Validate for UpdateGalleryItem {
    fn validate(&self) -> Result<(), CoreError> {
        if_present(self.title.as_deref(), |v| validate_short_text("title", v))?;
        if_present(self.image_url.as_deref(), |v| validate_url("image_url", v))?;
        if_present(self.hashtag.as_deref().filter(|v| !v.is_empty()), |v| {
            validate_short_text("hashtag", v)
        })?;
        if_present(self.description.as_deref(), |v| {
            max_chars("description", v, MAX_LONG_TEXT)
        })
    }

    fn normalize(&mut self) {
        if let Some(tag) = self.hashtag.take() {
            self.hashtag = Some(normalize_hashtag(&tag).unwrap_or_default());
        }
        if let Some(description) = &mut self.description {
            if description.trim().is_empty() {
                description.clear();
            }
        }
    }
}

/// Blank means the column is cleared.
fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

impl Record for GalleryItem {
    type Create = CreateGalleryItem;
    type Update = UpdateGalleryItem;

    const TABLE: &'static str = "gallery";
    const ENTITY: &'static str = "GalleryItem";
    const ROUTE: &'static str = "gallery";
    const CATEGORY_COLUMN: Option<&'static str> = Some("hashtag");

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn category_key(filter: &str) -> Option<String> {
        normalize_hashtag(filter)
    }

    fn to_draft(&self) -> CreateGalleryItem {
        CreateGalleryItem {
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            hashtag: self.hashtag.clone(),
            description: self.description.clone(),
        }
    }
}

impl MemoryRecord for GalleryItem {
    fn materialize(id: DbId, now: Timestamp, input: &CreateGalleryItem) -> Self {
        Self {
            id,
            title: input.title.clone(),
            image_url: input.image_url.clone(),
            hashtag: input.hashtag.as_deref().and_then(non_blank),
            description: input.description.as_deref().and_then(non_blank),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &UpdateGalleryItem, now: Timestamp) {
        if let Some(v) = &input.title {
            self.title = v.clone();
        }
        if let Some(v) = &input.image_url {
            self.image_url = v.clone();
        }
        if let Some(v) = &input.hashtag {
            self.hashtag = non_blank(v);
        }
        if let Some(v) = &input.description {
            self.description = non_blank(v);
        }
        self.updated_at = now;
    }

    fn category(&self) -> Option<&str> {
        self.hashtag.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtags_lose_their_hash() {
        let mut item = CreateGalleryItem {
            title: "Tree planting".into(),
            image_url: "https://img.example.org/t.jpg".into(),
            hashtag: Some("#GreenFuture".into()),
            description: None,
        };
        item.normalize();
        assert_eq!(item.hashtag.as_deref(), Some("GreenFuture"));

        item.hashtag = Some(" # ".into());
        item.normalize();
        assert_eq!(item.hashtag, None);
    }

    #[test]
    fn edit_draft_clears_absent_optionals() {
        let draft = CreateGalleryItem {
            title: "Tree planting".into(),
            image_url: "https://img.example.org/t.jpg".into(),
            hashtag: None,
            description: None,
        };
        let mut update = UpdateGalleryItem::from(draft);
        update.normalize();
        assert!(update.validate().is_ok());
        assert_eq!(update.hashtag.as_deref(), Some(""));
        assert_eq!(update.description.as_deref(), Some(""));

        let mut row = GalleryItem::materialize(
            1,
            chrono::Utc::now(),
            &CreateGalleryItem {
                title: "Tree planting".into(),
                image_url: "https://img.example.org/t.jpg".into(),
                hashtag: Some("GreenFuture".into()),
                description: Some("old".into()),
            },
        );
        row.apply(&update, chrono::Utc::now());
        assert_eq!(row.hashtag, None);
        assert_eq!(row.description, None);

        // Absent fields are left alone.
        let mut row2 = row.clone();
        row2.hashtag = Some("Kept".into());
        row2.apply(&UpdateGalleryItem::default(), chrono::Utc::now());
        assert_eq!(row2.hashtag.as_deref(), Some("Kept"));
    }

    #[test]
    fn hashtag_filters_ignore_the_hash() {
        assert_eq!(GalleryItem::category_key("#GreenFuture").as_deref(), Some("GreenFuture"));
        assert_eq!(GalleryItem::category_key("GreenFuture").as_deref(), Some("GreenFuture"));
    }
}
