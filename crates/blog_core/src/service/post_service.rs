//! Post use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete entry points for posts.
//! - Validate against the repository's `ValidationConfig`.
//!
//! # Invariants
//! - Field setters validate only the assigned field; on failure nothing is
//!   written.

use crate::model::post::{NewPost, Post, PostCategory, PostDraft, PostId};
use crate::model::validation::{validate_content, validate_summary, validate_title};
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates a draft and persists it as a new post.
    pub fn create_post(&self, draft: &PostDraft) -> RepoResult<Post> {
        let created = NewPost::from_draft(draft, self.repo.validation_config())
            .map_err(RepoError::from)
            .and_then(|post| self.repo.create_post(&post))
            .and_then(|id| self.load(id));
        log_outcome("post_create", &created);
        created
    }

    pub fn set_title(&self, id: PostId, title: &str) -> RepoResult<Post> {
        let markers = &self.repo.validation_config().clickbait_markers;
        let updated = self.update_with(id, |post| {
            post.title = validate_title(Some(title), markers)?;
            Ok(())
        });
        log_outcome("post_set_title", &updated);
        updated
    }

    pub fn set_content(&self, id: PostId, content: &str) -> RepoResult<Post> {
        let updated = self.update_with(id, |post| {
            post.content = validate_content(Some(content))?;
            Ok(())
        });
        log_outcome("post_set_content", &updated);
        updated
    }

    pub fn set_summary(&self, id: PostId, summary: &str) -> RepoResult<Post> {
        let updated = self.update_with(id, |post| {
            post.summary = validate_summary(Some(summary))?;
            Ok(())
        });
        log_outcome("post_set_summary", &updated);
        updated
    }

    /// Assigns a category by label (`Fiction` or `Non-Fiction`, exact case).
    pub fn set_category(&self, id: PostId, category: &str) -> RepoResult<Post> {
        let updated = self.update_with(id, |post| {
            post.category = PostCategory::parse(Some(category))?;
            Ok(())
        });
        log_outcome("post_set_category", &updated);
        updated
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)?;
        info!("event=post_delete module=service status=ok id={id}");
        Ok(())
    }

    fn update_with<F>(&self, id: PostId, assign: F) -> RepoResult<Post>
    where
        F: FnOnce(&mut Post) -> RepoResult<()>,
    {
        let mut post = self.load(id)?;
        assign(&mut post)?;
        self.repo.update_post(&post)?;
        self.load(id)
    }

    fn load(&self, id: PostId) -> RepoResult<Post> {
        self.repo
            .get_post(id)?
            .ok_or(RepoError::NotFound { entity: "post", id })
    }
}

fn log_outcome(event: &str, result: &RepoResult<Post>) {
    match result {
        Ok(post) => info!(
            "event={event} module=service status=ok id={} category={}",
            post.id,
            post.category.as_str()
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=service status=rejected field={}",
            err.field()
        ),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
