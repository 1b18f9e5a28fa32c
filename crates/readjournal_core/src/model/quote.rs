//! Quote domain model.
//!
//! # Responsibility
//! - Define the Quote record and its reference to a Book identity key.
//! - Parse raw quote input (text, page number) into typed fields.
//!
//! # Invariants
//! - `text` of a validated quote is non-empty after trimming.
//! - `page_number` of a validated quote is `>= 1`.
//! - The book reference is checked only at creation time.

use crate::model::book::BookKey;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Quote collected from a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    /// Title of the referenced book, as stored on that book.
    pub book_title: String,
    /// Author of the referenced book, as stored on that book.
    pub author: String,
    pub page_number: u32,
}

impl Quote {
    /// Identity key of the referenced book.
    pub fn book_key(&self) -> BookKey {
        BookKey::new(&self.book_title, &self.author)
    }

    /// Case-insensitive substring match against the quote text.
    pub fn contains_text(&self, fragment: &str) -> bool {
        self.text
            .to_lowercase()
            .contains(fragment.trim().to_lowercase().as_str())
    }
}

/// Unvalidated quote input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteDraft {
    pub book_title: String,
    pub author: String,
    pub text: String,
    /// Raw page number text.
    pub page: String,
}

impl QuoteDraft {
    /// Identity key of the book this draft refers to.
    pub fn book_key(&self) -> BookKey {
        BookKey::new(&self.book_title, &self.author)
    }
}

/// Ordering applied when listing quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteSortKey {
    #[default]
    Book,
    Author,
}

impl QuoteSortKey {
    /// Parses a sort key, falling back to `Book` for unrecognized input.
    ///
    /// The returned flag is `true` when the fallback was applied.
    pub fn parse_or_default(raw: &str) -> (Self, bool) {
        match raw.trim().to_lowercase().as_str() {
            "book" => (Self::Book, false),
            "author" => (Self::Author, false),
            _ => (Self::default(), true),
        }
    }
}

/// Validation failure for quote input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
    EmptyText,
    PageNotInteger(String),
    PageNotPositive(i64),
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "Quote cannot be empty."),
            Self::PageNotInteger(_) => write!(f, "Invalid page number. Must be an integer."),
            Self::PageNotPositive(_) => write!(f, "Page number must be positive."),
        }
    }
}

impl Error for QuoteValidationError {}

/// Validates quote text. Returns the trimmed text.
pub fn parse_quote_text(raw: &str) -> Result<String, QuoteValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuoteValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Parses a page number; pages start at 1.
pub fn parse_page_number(raw: &str) -> Result<u32, QuoteValidationError> {
    let trimmed = raw.trim();
    let page = trimmed
        .parse::<i64>()
        .map_err(|_| QuoteValidationError::PageNotInteger(trimmed.to_string()))?;
    if page < 1 {
        return Err(QuoteValidationError::PageNotPositive(page));
    }
    u32::try_from(page).map_err(|_| QuoteValidationError::PageNotInteger(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_page_number, parse_quote_text, QuoteSortKey, QuoteValidationError};

    #[test]
    fn page_number_must_be_positive_integer() {
        assert_eq!(parse_page_number(" 12 ").unwrap(), 12);
        assert_eq!(
            parse_page_number("0").unwrap_err(),
            QuoteValidationError::PageNotPositive(0)
        );
        assert_eq!(
            parse_page_number("twelve").unwrap_err(),
            QuoteValidationError::PageNotInteger("twelve".to_string())
        );
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            parse_quote_text("  \t").unwrap_err(),
            QuoteValidationError::EmptyText
        );
    }

    #[test]
    fn unknown_sort_key_falls_back_to_book() {
        assert_eq!(
            QuoteSortKey::parse_or_default("Author"),
            (QuoteSortKey::Author, false)
        );
        assert_eq!(
            QuoteSortKey::parse_or_default("page"),
            (QuoteSortKey::Book, true)
        );
    }
}
