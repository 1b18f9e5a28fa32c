//! In-memory repositories for books and quotes.
//!
//! # Responsibility
//! - Own the ordered record collections for one session.
//! - Enforce data-model invariants on every mutation.
//!
//! # Invariants
//! - Repository writes validate input before touching the collection.
//! - Rejected operations never mutate state.
//! - Repository APIs return semantic errors (`BookNotFound`,
//!   `DuplicateBook`) in addition to validation errors.

use crate::model::book::{BookKey, BookValidationError};
use crate::model::quote::QuoteValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book_repo;
pub mod quote_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book and quote operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Book(BookValidationError),
    Quote(QuoteValidationError),
    /// A book with the same identity key already exists.
    DuplicateBook(BookKey),
    /// No book matches the identity key.
    BookNotFound(BookKey),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Book(err) => write!(f, "{err}"),
            Self::Quote(err) => write!(f, "{err}"),
            Self::DuplicateBook(_) => {
                write!(f, "Error: Book with this Title and Author already exists.")
            }
            Self::BookNotFound(_) => write!(f, "Book not found."),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Book(err) => Some(err),
            Self::Quote(err) => Some(err),
            Self::DuplicateBook(_) | Self::BookNotFound(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Book(value)
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Quote(value)
    }
}
