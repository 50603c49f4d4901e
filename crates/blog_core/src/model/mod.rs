//! Domain model for blog authors and posts.
//!
//! # Responsibility
//! - Define the persisted record shapes and their unvalidated inputs.
//! - Own every field validation rule.
//!
//! # Invariants
//! - A record is never persisted with a field value that failed validation.
//! - Validators are pure functions; storage access is injected.

pub mod author;
pub mod post;
pub mod validation;
