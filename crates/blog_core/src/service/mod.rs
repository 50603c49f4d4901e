//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod author_service;
pub mod post_service;
