//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for authors and posts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate records before any SQL mutation.
//! - Storage constraint violations surface as validation errors, not raw
//!   database errors.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for author/post persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
    /// Connection was not opened through `db::open_db*`.
    SchemaNotReady { found: u32, expected: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "connection schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) | Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Returns the validation failure carried by this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Page {
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    /// Appends `LIMIT` / `OFFSET` clauses with positional placeholders and
    /// returns the values to bind, in order.
    pub(crate) fn push_sql(&self, sql: &mut String) -> Vec<i64> {
        let mut bind_values = Vec::new();
        match self.limit {
            Some(limit) => {
                sql.push_str(" LIMIT ?");
                bind_values.push(i64::from(limit));
            }
            None if self.offset > 0 => sql.push_str(" LIMIT -1"),
            None => return bind_values,
        }
        if self.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(i64::from(self.offset));
        }
        bind_values
    }
}

fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let found = current_version(conn)?;
    let expected = latest_version();
    if found != expected {
        return Err(RepoError::SchemaNotReady { found, expected });
    }
    Ok(())
}

/// Maps a storage `UNIQUE` violation on a write to `violation`.
fn map_write_error(err: rusqlite::Error, violation: ValidationError) -> RepoError {
    let err = DbError::from(err);
    if err.is_unique_violation() {
        RepoError::Validation(violation)
    } else {
        RepoError::Db(err)
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn page_without_limit_or_offset_adds_nothing() {
        let mut sql = String::from("SELECT 1");
        let binds = Page::default().push_sql(&mut sql);
        assert_eq!(sql, "SELECT 1");
        assert!(binds.is_empty());
    }

    #[test]
    fn page_with_offset_only_uses_unbounded_limit() {
        let mut sql = String::new();
        let binds = Page {
            limit: None,
            offset: 5,
        }
        .push_sql(&mut sql);
        assert_eq!(sql, " LIMIT -1 OFFSET ?");
        assert_eq!(binds, vec![5]);
    }

    #[test]
    fn page_with_limit_and_offset_binds_both() {
        let mut sql = String::new();
        let binds = Page {
            limit: Some(10),
            offset: 20,
        }
        .push_sql(&mut sql);
        assert_eq!(sql, " LIMIT ? OFFSET ?");
        assert_eq!(binds, vec![10, 20]);
    }
}
