//! Journal use-case service.
//!
//! # Responsibility
//! - Own both repositories for one session.
//! - Route cross-repository use-cases (quote creation, aggregate queries).
//! - Emit metadata-only diagnostic events for every mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Log events carry counts and outcomes only, never record text.

use crate::model::book::{Book, BookDraft, BookKey};
use crate::model::quote::{Quote, QuoteDraft, QuoteSortKey};
use crate::repo::book_repo::{BookRepository, BookUpdate};
use crate::repo::quote_repo::QuoteRepository;
use crate::repo::RepoResult;
use crate::service::query_service::{self, MostQuotedBook, TopAuthors};
use log::{debug, warn};

/// Both record collections of one reading journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    books: BookRepository,
    quotes: QuoteRepository,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a journal from loaded collections, keeping their order.
    pub fn from_parts(books: Vec<Book>, quotes: Vec<Quote>) -> Self {
        Self {
            books: BookRepository::from_books(books),
            quotes: QuoteRepository::from_quotes(quotes),
        }
    }

    pub fn books(&self) -> &BookRepository {
        &self.books
    }

    pub fn quotes(&self) -> &QuoteRepository {
        &self.quotes
    }

    pub fn into_parts(self) -> (Vec<Book>, Vec<Quote>) {
        (self.books.into_vec(), self.quotes.into_vec())
    }

    pub fn add_book(&mut self, draft: &BookDraft) -> RepoResult<&Book> {
        let result = self.books.add(draft);
        log_outcome("book_add", result.is_ok());
        result
    }

    pub fn update_book(&mut self, key: &BookKey, update: BookUpdate) -> RepoResult<&Book> {
        let result = self.books.update(key, update);
        log_outcome("book_update", result.is_ok());
        result
    }

    /// Deletes a book. Its quotes stay in place and may now dangle.
    pub fn delete_book(&mut self, key: &BookKey) -> RepoResult<Book> {
        let result = self.books.delete(key);
        log_outcome("book_delete", result.is_ok());
        if result.is_ok() {
            let dangling = self
                .quotes
                .as_slice()
                .iter()
                .filter(|quote| quote.book_key() == *key)
                .count();
            if dangling > 0 {
                warn!(
                    "event=book_delete module=service status=ok dangling_quotes={}",
                    dangling
                );
            }
        }
        result
    }

    pub fn add_quote(&mut self, draft: &QuoteDraft) -> RepoResult<&Quote> {
        let result = self.quotes.add(&self.books, draft);
        log_outcome("quote_add", result.is_ok());
        result
    }

    /// See `QuoteRepository::delete_matching`.
    pub fn delete_quote<F, E>(&mut self, fragment: &str, confirm: F) -> Result<Option<Quote>, E>
    where
        F: FnMut(&Quote) -> Result<bool, E>,
    {
        let result = self.quotes.delete_matching(fragment, confirm);
        if let Ok(removed) = &result {
            log_outcome("quote_delete", removed.is_some());
        }
        result
    }

    pub fn view_books(&self) -> Vec<&Book> {
        self.books.view_all()
    }

    pub fn view_quotes(&self, sort_by: QuoteSortKey) -> Vec<&Quote> {
        self.quotes.view_all(sort_by)
    }

    pub fn completed_in_year(&self, year: i32) -> Vec<&Book> {
        query_service::completed_in_year(&self.books, year)
    }

    pub fn book_with_most_quotes(&self) -> Option<MostQuotedBook> {
        query_service::book_with_most_quotes(self.quotes.as_slice(), &self.books)
    }

    pub fn authors_with_most_entries(&self) -> Option<TopAuthors> {
        query_service::authors_with_most_entries(self.books.as_slice())
    }
}

fn log_outcome(event: &str, ok: bool) {
    if ok {
        debug!("event={event} module=service status=ok");
    } else {
        debug!("event={event} module=service status=rejected");
    }
}
