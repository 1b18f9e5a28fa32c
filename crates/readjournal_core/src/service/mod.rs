//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the session loop decoupled from collection details.

pub mod journal_service;
pub mod query_service;
