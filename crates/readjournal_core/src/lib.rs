//! Core domain logic for the reading journal.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod store;

pub use config::{JournalConfig, LoadPolicy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookDraft, BookKey, BookValidationError, ReadingStatus, SearchField};
pub use model::quote::{Quote, QuoteDraft, QuoteSortKey, QuoteValidationError};
pub use repo::book_repo::{BookRepository, BookUpdate, UpdateAction};
pub use repo::quote_repo::QuoteRepository;
pub use repo::{RepoError, RepoResult};
pub use service::journal_service::Journal;
pub use service::query_service::{
    authors_with_most_entries, book_with_most_quotes, completed_in_year, MostQuotedBook,
    TopAuthors,
};
pub use session::{MenuChoice, Session, SessionError, SessionResult, SessionSummary};
pub use store::{JournalStore, JsonFileStore, LoadOutcome, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
