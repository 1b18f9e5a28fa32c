//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical Book record and its identity key.
//! - Parse raw user text into typed fields exactly once, at the boundary.
//!
//! # Invariants
//! - `BookKey` is always the trimmed, lower-cased `(title, author)` pair.
//! - `year` of a validated book lies in `MIN_YEAR..=MAX_YEAR`.
//! - Genres are trimmed, lower-cased, non-empty and deduplicated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Earliest accepted publication year.
pub const MIN_YEAR: i32 = 0;
/// Latest accepted publication year.
pub const MAX_YEAR: i32 = 2025;

/// Reading progress for one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "reading")]
    Reading,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "on hold")]
    OnHold,
}

impl ReadingStatus {
    /// All statuses in menu order.
    pub const ALL: [ReadingStatus; 3] = [Self::Reading, Self::Completed, Self::OnHold];

    /// Stable lower-case name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::OnHold => "on hold",
        }
    }

    /// Title-cased name used in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

impl Display for ReadingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = BookValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| BookValidationError::InvalidStatus(value.trim().to_string()))
    }
}

/// Field a book search filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Genre,
    Status,
}

impl SearchField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Status => "status",
        }
    }
}

impl FromStr for SearchField {
    type Err = BookValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "genre" => Ok(Self::Genre),
            "status" => Ok(Self::Status),
            other => Err(BookValidationError::InvalidSearchField(other.to_string())),
        }
    }
}

/// Case-insensitive identity of a book: lower-cased `(title, author)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookKey {
    title: String,
    author: String,
}

impl BookKey {
    /// Builds a key from raw title/author text.
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            author: author.trim().to_lowercase(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

impl Display for BookKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` by `{}`", self.title, self.author)
    }
}

/// Canonical book record, as stored and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Trimmed title as entered by the user.
    pub title: String,
    /// Trimmed author as entered by the user.
    pub author: String,
    /// Publication year.
    pub year: i32,
    /// Normalized genre tags, serialized as a JSON array.
    pub genres: BTreeSet<String>,
    pub status: ReadingStatus,
}

impl Book {
    /// Returns the identity key of this book.
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, &self.author)
    }

    /// Returns whether this book is identified by `key`.
    pub fn matches(&self, key: &BookKey) -> bool {
        self.title.trim().to_lowercase() == key.title()
            && self.author.trim().to_lowercase() == key.author()
    }

    /// Merges `genres` into the existing set. Never removes a genre.
    pub fn add_genres(&mut self, genres: BTreeSet<String>) {
        self.genres.extend(genres);
    }

    /// Returns whether `genre` (already normalized) is one of this book's tags.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }
}

/// Unvalidated book input, carrying raw text for every typed field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: String,
    /// Comma-separated genre list.
    pub genres: String,
    pub status: String,
}

impl BookDraft {
    /// Validates every field and builds the canonical record.
    pub fn validate(&self) -> Result<Book, BookValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }

        let year = parse_year(&self.year)?;
        let genres = parse_genres(&self.genres);
        let status = self.status.parse::<ReadingStatus>()?;

        Ok(Book {
            title: title.to_string(),
            author: author.to_string(),
            year,
            genres,
            status,
        })
    }

    /// Identity key this draft would occupy once added.
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, &self.author)
    }
}

/// Validation failure for book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    /// Year text is not an integer.
    YearNotInteger(String),
    /// Year parsed but lies outside `MIN_YEAR..=MAX_YEAR`.
    YearOutOfRange(i64),
    InvalidStatus(String),
    InvalidSearchField(String),
    InvalidUpdateAction(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Book title cannot be empty."),
            Self::EmptyAuthor => write!(f, "Author cannot be empty."),
            Self::YearNotInteger(_) => write!(f, "Invalid year. Must be an integer."),
            Self::YearOutOfRange(_) => write!(
                f,
                "Invalid year. Must be between {MIN_YEAR} and {MAX_YEAR}."
            ),
            Self::InvalidStatus(_) => write!(
                f,
                "Invalid status. Must be 'reading', 'completed', or 'on hold'."
            ),
            Self::InvalidSearchField(_) => {
                write!(f, "Invalid search type. Must be 'genre' or 'status'.")
            }
            Self::InvalidUpdateAction(_) => write!(f, "Invalid action."),
        }
    }
}

impl Error for BookValidationError {}

/// Parses a publication year and enforces the accepted range.
pub fn parse_year(raw: &str) -> Result<i32, BookValidationError> {
    let trimmed = raw.trim();
    let year = trimmed
        .parse::<i64>()
        .map_err(|_| BookValidationError::YearNotInteger(trimmed.to_string()))?;
    if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
        return Err(BookValidationError::YearOutOfRange(year));
    }
    // Range check above guarantees the value fits.
    Ok(year as i32)
}

/// Parses a year used as a query filter. No range check is applied.
pub fn parse_year_query(raw: &str) -> Result<i32, BookValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| BookValidationError::YearNotInteger(trimmed.to_string()))
}

/// Normalizes one genre tag. Returns `None` for blank input.
pub fn normalize_genre(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Splits a comma-separated list into a normalized genre set.
pub fn parse_genres(raw: &str) -> BTreeSet<String> {
    raw.split(',').filter_map(normalize_genre).collect()
}
