//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Answer name-existence lookups for uniqueness validation.
//!
//! # Invariants
//! - Write paths call `Author::validate()` (or take a validated `NewAuthor`)
//!   before SQL mutations.
//! - The `UNIQUE` index on `authors.name` is the source of truth; a violation
//!   is reported as `ValidationError::DuplicateName`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::author::{Author, AuthorId, AuthorNameLookup, NewAuthor};
use crate::model::validation::ValidationError;
use crate::repo::{ensure_schema_ready, map_write_error, Page, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Query options for listing authors. Results are ordered by `id ASC`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for author CRUD operations.
pub trait AuthorRepository: AuthorNameLookup<Error = RepoError> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<AuthorId>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    /// Replaces name and phone number of an existing author.
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::SchemaNotReady` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AuthorNameLookup for SqliteAuthorRepository<'_> {
    type Error = RepoError;

    fn name_exists(&self, name: &str, exclude: Option<AuthorId>) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM authors
                WHERE name = ?1
                  AND (?2 IS NULL OR id <> ?2)
            );",
            params![name, exclude],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<AuthorId> {
        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name(), author.phone_number()],
            )
            .map_err(|err| map_write_error(err, ValidationError::DuplicateName))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_author_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        let id: Option<AuthorId> = self
            .conn
            .query_row("SELECT id FROM authors WHERE name = ?1;", [name], |row| {
                row.get(0)
            })
            .optional()?;
        match id {
            Some(id) => self.get_author(id),
            None => Ok(None),
        }
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let bind_values = Page {
            limit: query.limit,
            offset: query.offset,
        }
        .push_sql(&mut sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        author.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![author.name, author.phone_number, author.id],
            )
            .map_err(|err| map_write_error(err, ValidationError::DuplicateName))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "author",
                id: author.id,
            });
        }

        Ok(())
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "author",
                id,
            });
        }
        Ok(())
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let author = Author {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    author.validate().map_err(|err| {
        RepoError::InvalidData(format!("authors.id={} fails validation: {err}", author.id))
    })?;
    Ok(author)
}
