//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `posts` table.
//! - Support category filtering and pagination for list queries.
//!
//! # Invariants
//! - Write paths call `Post::validate()` (or take a validated `NewPost`)
//!   before SQL mutations, using the repository's `ValidationConfig`.
//! - Unknown category labels in storage are rejected on read.

use crate::config::ValidationConfig;
use crate::model::post::{NewPost, Post, PostCategory, PostId};
use crate::repo::{ensure_schema_ready, Page, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    summary,
    category,
    created_at,
    updated_at
FROM posts";

/// Query options for listing posts. Results are ordered by `id ASC`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub category: Option<PostCategory>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create_post(&self, post: &NewPost) -> RepoResult<PostId>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    /// Replaces every mutable field of an existing post.
    fn update_post(&self, post: &Post) -> RepoResult<()>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
    /// Config used to validate writes.
    fn validation_config(&self) -> &ValidationConfig;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
    config: ValidationConfig,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository with the default validation config.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::try_with_config(conn, ValidationConfig::default())
    }

    /// Constructs a repository that validates writes against `config`.
    pub fn try_with_config(conn: &'conn Connection, config: ValidationConfig) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn, config })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &NewPost) -> RepoResult<PostId> {
        self.conn.execute(
            "INSERT INTO posts (title, content, summary, category)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title(),
                post.content(),
                post.summary(),
                post.category().as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_post_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY id ASC");
        let page = Page {
            limit: query.limit,
            offset: query.offset,
        };
        bind_values.extend(page.push_sql(&mut sql).into_iter().map(Value::Integer));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn update_post(&self, post: &Post) -> RepoResult<()> {
        post.validate(&self.config)?;

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                summary = ?3,
                category = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                post.title,
                post.content,
                post.summary,
                post.category.as_str(),
                post.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "post",
                id: post.id,
            });
        }

        Ok(())
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "post", id });
        }
        Ok(())
    }

    fn validation_config(&self) -> &ValidationConfig {
        &self.config
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let category_text: String = row.get("category")?;
    let category = PostCategory::parse(Some(category_text.as_str())).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in posts.category (id={id})"
        ))
    })?;

    Ok(Post {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        category,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
