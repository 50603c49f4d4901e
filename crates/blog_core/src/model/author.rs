//! Author domain model.
//!
//! # Responsibility
//! - Define the persisted author record and its unvalidated input shape.
//! - Run author field validation, including the name uniqueness check.
//!
//! # Invariants
//! - `NewAuthor` can only be built through validation.
//! - Name uniqueness is checked through an injected [`AuthorNameLookup`],
//!   never through global state.

use crate::model::validation::{validate_name, validate_phone_number, ValidationError};
use serde::{Deserialize, Serialize};

/// System-assigned author identifier (SQLite rowid).
pub type AuthorId = i64;

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub phone_number: String,
    /// Unix epoch milliseconds, set by storage at insert.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last update; `None` until first update.
    pub updated_at: Option<i64>,
}

impl Author {
    /// Re-checks the lookup-independent field rules on a full record.
    ///
    /// Name uniqueness is not covered here; storage enforces it on write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(Some(self.name.as_str()))?;
        validate_phone_number(Some(self.phone_number.as_str()))?;
        Ok(())
    }
}

/// Unvalidated author input, e.g. decoded from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl AuthorDraft {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            phone_number: Some(phone_number.into()),
        }
    }
}

/// Validated author ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    name: String,
    phone_number: String,
}

impl NewAuthor {
    /// Validates every draft field in order and returns the first failure.
    ///
    /// # Errors
    /// - `L::Error` converted from [`ValidationError`] on a rule violation.
    /// - `L::Error` from the lookup itself when the existence check fails.
    pub fn from_draft<L>(draft: &AuthorDraft, lookup: &L) -> Result<Self, L::Error>
    where
        L: AuthorNameLookup + ?Sized,
        L::Error: From<ValidationError>,
    {
        let name = validate_author_name(draft.name.as_deref(), None, lookup)?;
        let phone_number = validate_phone_number(draft.phone_number.as_deref())?;
        Ok(Self { name, phone_number })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// Existence check used by name uniqueness validation.
pub trait AuthorNameLookup {
    type Error;

    /// Returns whether an author named exactly `name` exists, ignoring the
    /// record with id `exclude`.
    fn name_exists(&self, name: &str, exclude: Option<AuthorId>) -> Result<bool, Self::Error>;
}

/// Validates an author name, including uniqueness against `lookup`.
///
/// `self_id` is the id of the record being updated, so that keeping the
/// current name is accepted. Pass `None` for new records.
pub fn validate_author_name<L>(
    value: Option<&str>,
    self_id: Option<AuthorId>,
    lookup: &L,
) -> Result<String, L::Error>
where
    L: AuthorNameLookup + ?Sized,
    L::Error: From<ValidationError>,
{
    let name = validate_name(value)?;
    if lookup.name_exists(name.as_str(), self_id)? {
        return Err(ValidationError::DuplicateName.into());
    }
    Ok(name)
}

impl AuthorNameLookup for [Author] {
    type Error = ValidationError;

    fn name_exists(&self, name: &str, exclude: Option<AuthorId>) -> Result<bool, Self::Error> {
        Ok(self
            .iter()
            .any(|author| author.name == name && Some(author.id) != exclude))
    }
}
