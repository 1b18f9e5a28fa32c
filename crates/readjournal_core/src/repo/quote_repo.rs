//! Quote repository.
//!
//! # Responsibility
//! - Keep the ordered list of quotes for one session.
//! - Check the referenced book exists when a quote is created.
//!
//! # Invariants
//! - A quote is only appended when its book exists at creation time.
//! - Deleting a book never removes its quotes.
//! - `delete_matching` removes at most one quote, and only after the caller
//!   confirmed that exact quote.

use crate::model::quote::{parse_page_number, parse_quote_text, Quote, QuoteDraft, QuoteSortKey};
use crate::repo::book_repo::BookRepository;
use crate::repo::{RepoError, RepoResult};

/// Ordered in-memory collection of quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRepository {
    quotes: Vec<Quote>,
}

impl QuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously loaded quotes without re-validating them.
    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quotes in insertion order.
    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn into_vec(self) -> Vec<Quote> {
        self.quotes
    }

    /// Validates and appends a quote for an existing book.
    ///
    /// The stored reference copies the book's own title/author spelling.
    ///
    /// # Errors
    /// - `BookNotFound` when no book has the draft's identity key.
    /// - `Quote(_)` for empty text or a bad page number.
    pub fn add(&mut self, books: &BookRepository, draft: &QuoteDraft) -> RepoResult<&Quote> {
        let key = draft.book_key();
        let book = books.get(&key).ok_or(RepoError::BookNotFound(key))?;
        let text = parse_quote_text(&draft.text)?;
        let page_number = parse_page_number(&draft.page)?;

        let index = self.quotes.len();
        self.quotes.push(Quote {
            text,
            book_title: book.title.clone(),
            author: book.author.clone(),
            page_number,
        });
        Ok(&self.quotes[index])
    }

    /// All quotes, stably sorted by lower-cased book title or author.
    pub fn view_all(&self, sort_by: QuoteSortKey) -> Vec<&Quote> {
        let mut sorted: Vec<&Quote> = self.quotes.iter().collect();
        match sort_by {
            QuoteSortKey::Book => {
                sorted.sort_by_cached_key(|quote| quote.book_title.to_lowercase())
            }
            QuoteSortKey::Author => sorted.sort_by_cached_key(|quote| quote.author.to_lowercase()),
        }
        sorted
    }

    /// Quotes whose text contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|quote| quote.contains_text(keyword))
            .collect()
    }

    /// Removes the first matching quote that `confirm` accepts.
    ///
    /// Candidates are offered in insertion order; a declined candidate moves
    /// on to the next match. Returns `Ok(None)` when nothing was removed.
    pub fn delete_matching<F, E>(
        &mut self,
        fragment: &str,
        mut confirm: F,
    ) -> Result<Option<Quote>, E>
    where
        F: FnMut(&Quote) -> Result<bool, E>,
    {
        for index in 0..self.quotes.len() {
            let candidate = &self.quotes[index];
            if candidate.contains_text(fragment) && confirm(candidate)? {
                return Ok(Some(self.quotes.remove(index)));
            }
        }
        Ok(None)
    }
}
