//! Author use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete entry points for authors.
//! - Run name uniqueness validation through the repository lookup.
//!
//! # Invariants
//! - Field setters validate only the assigned field; on failure nothing is
//!   written.
//! - Returned records are read back from storage after every write.

use crate::model::author::{validate_author_name, Author, AuthorDraft, AuthorId, NewAuthor};
use crate::model::validation::validate_phone_number;
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates a draft and persists it as a new author.
    ///
    /// # Errors
    /// - `RepoError::Validation` for the first failing field, including
    ///   `DuplicateName` from either the lookup or the storage constraint.
    pub fn create_author(&self, draft: &AuthorDraft) -> RepoResult<Author> {
        let created = NewAuthor::from_draft(draft, &self.repo)
            .and_then(|author| self.repo.create_author(&author))
            .and_then(|id| self.load(id));
        log_outcome("author_create", &created);
        created
    }

    /// Assigns a new name to an existing author.
    ///
    /// Keeping the author's current name is accepted.
    pub fn rename_author(&self, id: AuthorId, name: &str) -> RepoResult<Author> {
        let updated = self.update_with(id, |repo, author| {
            author.name = validate_author_name(Some(name), Some(id), repo)?;
            Ok(())
        });
        log_outcome("author_rename", &updated);
        updated
    }

    /// Assigns a new phone number to an existing author.
    pub fn set_phone_number(&self, id: AuthorId, phone_number: &str) -> RepoResult<Author> {
        let updated = self.update_with(id, |_, author| {
            author.phone_number = validate_phone_number(Some(phone_number))?;
            Ok(())
        });
        log_outcome("author_set_phone", &updated);
        updated
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_by_name(name)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)?;
        info!("event=author_delete module=service status=ok id={id}");
        Ok(())
    }

    fn update_with<F>(&self, id: AuthorId, assign: F) -> RepoResult<Author>
    where
        F: FnOnce(&R, &mut Author) -> RepoResult<()>,
    {
        let mut author = self.load(id)?;
        assign(&self.repo, &mut author)?;
        self.repo.update_author(&author)?;
        self.load(id)
    }

    fn load(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo.get_author(id)?.ok_or(RepoError::NotFound {
            entity: "author",
            id,
        })
    }
}

// Metadata only: names and phone numbers stay out of logs.
fn log_outcome(event: &str, result: &RepoResult<Author>) {
    match result {
        Ok(author) => info!("event={event} module=service status=ok id={}", author.id),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=service status=rejected field={}",
            err.field()
        ),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
