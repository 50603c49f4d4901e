//! Core domain logic for blog authors and posts.
//! This crate is the single source of truth for record validation rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ValidationConfig, DEFAULT_CLICKBAIT_MARKERS};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::{
    validate_author_name, Author, AuthorDraft, AuthorId, AuthorNameLookup, NewAuthor,
};
pub use model::post::{NewPost, Post, PostCategory, PostDraft, PostId};
pub use model::validation::{
    validate_category, validate_content, validate_name, validate_phone_number, validate_summary,
    validate_title, ValidationError,
};
pub use repo::author_repo::{AuthorListQuery, AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::PostService;

/// Minimal health-check API for wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
