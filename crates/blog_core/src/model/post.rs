//! Post domain model.
//!
//! # Responsibility
//! - Define the persisted post record, its category, and its input shape.
//! - Run post field validation against a [`ValidationConfig`].
//!
//! # Invariants
//! - `NewPost` can only be built through validation.
//! - `category` is one of the two accepted labels; storage holds the label.

use crate::config::ValidationConfig;
use crate::model::validation::{
    validate_category, validate_content, validate_summary, validate_title, ValidationError,
    CATEGORY_FICTION, CATEGORY_NON_FICTION,
};
use serde::{Deserialize, Serialize};

/// System-assigned post identifier (SQLite rowid).
pub type PostId = i64;

/// Post category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl PostCategory {
    /// Returns the exact stored/serialized label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => CATEGORY_FICTION,
            Self::NonFiction => CATEGORY_NON_FICTION,
        }
    }

    /// Validates a category label and maps it to the enum.
    pub fn parse(value: Option<&str>) -> Result<Self, ValidationError> {
        let label = validate_category(value)?;
        if label == CATEGORY_FICTION {
            Ok(Self::Fiction)
        } else {
            Ok(Self::NonFiction)
        }
    }
}

/// Persisted post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: PostCategory,
    /// Unix epoch milliseconds, set by storage at insert.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last update; `None` until first update.
    pub updated_at: Option<i64>,
}

impl Post {
    /// Re-checks the title, content and summary rules on a full record.
    ///
    /// `category` is not re-checked: `PostCategory` only holds accepted values.
    pub fn validate(&self, config: &ValidationConfig) -> Result<(), ValidationError> {
        validate_title(Some(self.title.as_str()), &config.clickbait_markers)?;
        validate_content(Some(self.content.as_str()))?;
        validate_summary(Some(self.summary.as_str()))?;
        Ok(())
    }
}

/// Unvalidated post input, e.g. decoded from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Validated post ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    summary: String,
    category: PostCategory,
}

impl NewPost {
    /// Validates every draft field in order and returns the first failure.
    pub fn from_draft(draft: &PostDraft, config: &ValidationConfig) -> Result<Self, ValidationError> {
        let title = validate_title(draft.title.as_deref(), &config.clickbait_markers)?;
        let content = validate_content(draft.content.as_deref())?;
        let summary = validate_summary(draft.summary.as_deref())?;
        let category = PostCategory::parse(draft.category.as_deref())?;
        Ok(Self {
            title,
            content,
            summary,
            category,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn category(&self) -> PostCategory {
        self.category
    }
}
