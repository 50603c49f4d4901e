//! Field validators for author and post records.
//!
//! # Responsibility
//! - Gate every candidate field value before it reaches storage.
//! - Report one human-readable error per violated rule.
//!
//! # Invariants
//! - Validators return the accepted value unchanged.
//! - Checks run in a fixed order; the first failing check wins.
//! - Lengths are counted in `char`s, not bytes.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required phone number length, in digits.
pub const PHONE_NUMBER_LEN: usize = 10;
/// Minimum post content length, inclusive.
pub const CONTENT_MIN_CHARS: usize = 250;
/// Maximum post summary length, inclusive.
pub const SUMMARY_MAX_CHARS: usize = 250;
/// Accepted post category labels.
pub const CATEGORY_FICTION: &str = "Fiction";
pub const CATEGORY_NON_FICTION: &str = "Non-Fiction";

/// Validation error for author/post field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NameRequired,
    DuplicateName,
    PhoneNumberRequired,
    PhoneNumberNotDigits,
    PhoneNumberLength { len: usize },
    TitleRequired,
    /// Title contains none of the configured marker phrases.
    TitleNotClickbait { markers: Vec<String> },
    ContentRequired,
    ContentTooShort { len: usize },
    SummaryRequired,
    SummaryTooLong { len: usize },
    CategoryRequired,
    InvalidCategory(String),
}

impl ValidationError {
    /// Returns the record field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired | Self::DuplicateName => "name",
            Self::PhoneNumberRequired
            | Self::PhoneNumberNotDigits
            | Self::PhoneNumberLength { .. } => "phone_number",
            Self::TitleRequired | Self::TitleNotClickbait { .. } => "title",
            Self::ContentRequired | Self::ContentTooShort { .. } => "content",
            Self::SummaryRequired | Self::SummaryTooLong { .. } => "summary",
            Self::CategoryRequired | Self::InvalidCategory(_) => "category",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::DuplicateName => write!(f, "Author name must be unique"),
            Self::PhoneNumberRequired => write!(f, "Phone number is required"),
            Self::PhoneNumberNotDigits => write!(f, "Phone number must contain only digits"),
            Self::PhoneNumberLength { .. } => write!(
                f,
                "Phone number must be exactly {PHONE_NUMBER_LEN} digits"
            ),
            Self::TitleRequired => write!(f, "Post title is required"),
            Self::TitleNotClickbait { markers } => write!(
                f,
                "Post title must be clickbait-y and contain one of: {}",
                render_marker_list(markers)
            ),
            Self::ContentRequired => write!(f, "Post content is required"),
            Self::ContentTooShort { .. } => write!(
                f,
                "Post content must be at least {CONTENT_MIN_CHARS} characters"
            ),
            Self::SummaryRequired => write!(f, "Post summary is required"),
            Self::SummaryTooLong { .. } => write!(
                f,
                "Post summary must be at most {SUMMARY_MAX_CHARS} characters"
            ),
            Self::CategoryRequired => write!(f, "Post category is required"),
            Self::InvalidCategory(value) => write!(
                f,
                "Invalid post category `{value}`; expected {CATEGORY_FICTION} or {CATEGORY_NON_FICTION}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Checks that an author name is present and non-blank.
///
/// Uniqueness is checked separately by
/// [`validate_author_name`](crate::model::author::validate_author_name).
pub fn validate_name(value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::NameRequired),
    }
}

/// Checks that a phone number is exactly ten decimal digits.
///
/// Only ASCII `0`-`9` count as digits; other Unicode decimal digits (e.g.
/// Arabic-Indic `٣`) are rejected so stored numbers stay dialable as-is.
pub fn validate_phone_number(value: Option<&str>) -> Result<String, ValidationError> {
    let phone_number = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ValidationError::PhoneNumberRequired),
    };

    if !phone_number.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::PhoneNumberNotDigits);
    }

    let len = phone_number.chars().count();
    if len != PHONE_NUMBER_LEN {
        return Err(ValidationError::PhoneNumberLength { len });
    }

    Ok(phone_number.to_string())
}

/// Checks that a post title is non-blank and carries one of `markers`.
///
/// Marker matching is a case-sensitive substring search.
pub fn validate_title(value: Option<&str>, markers: &[String]) -> Result<String, ValidationError> {
    let title = match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(ValidationError::TitleRequired),
    };

    if !markers.iter().any(|marker| title.contains(marker.as_str())) {
        return Err(ValidationError::TitleNotClickbait {
            markers: markers.to_vec(),
        });
    }

    Ok(title.to_string())
}

/// Checks that post content is present and at least 250 characters long.
pub fn validate_content(value: Option<&str>) -> Result<String, ValidationError> {
    let content = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ValidationError::ContentRequired),
    };

    let len = content.chars().count();
    if len < CONTENT_MIN_CHARS {
        return Err(ValidationError::ContentTooShort { len });
    }

    Ok(content.to_string())
}

/// Checks that a post summary is present and at most 250 characters long.
pub fn validate_summary(value: Option<&str>) -> Result<String, ValidationError> {
    let summary = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ValidationError::SummaryRequired),
    };

    let len = summary.chars().count();
    if len > SUMMARY_MAX_CHARS {
        return Err(ValidationError::SummaryTooLong { len });
    }

    Ok(summary.to_string())
}

/// Checks that a category label is present and exactly one of the accepted
/// values, returning the label unchanged.
pub fn validate_category(value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        None | Some("") => Err(ValidationError::CategoryRequired),
        Some(category @ (CATEGORY_FICTION | CATEGORY_NON_FICTION)) => Ok(category.to_string()),
        Some(other) => Err(ValidationError::InvalidCategory(other.to_string())),
    }
}

// 'A', 'B', 'C', or 'D'
fn render_marker_list(markers: &[String]) -> String {
    let quoted: Vec<String> = markers.iter().map(|marker| format!("'{marker}'")).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    }
}
