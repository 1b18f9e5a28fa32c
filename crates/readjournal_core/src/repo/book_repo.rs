//! Book repository.
//!
//! # Responsibility
//! - Keep the ordered list of books for one session.
//! - Provide add/update/delete/search over that list.
//!
//! # Invariants
//! - No two books share a `BookKey`.
//! - `update` with genres is a set union; it never removes a genre.
//! - `view_all` is sorted by year ascending and stable for equal years.

use crate::model::book::{
    normalize_genre, parse_genres, Book, BookDraft, BookKey, BookValidationError, ReadingStatus,
    SearchField,
};
use crate::repo::{RepoError, RepoResult};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Field selected by an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Status,
    Genres,
}

impl FromStr for UpdateAction {
    type Err = BookValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "genres" => Ok(Self::Genres),
            other => Err(BookValidationError::InvalidUpdateAction(other.to_string())),
        }
    }
}

/// Typed mutation applied by `BookRepository::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookUpdate {
    /// Replace the reading status.
    Status(ReadingStatus),
    /// Union the given genres into the existing set.
    Genres(BTreeSet<String>),
}

impl BookUpdate {
    /// Builds an update from an action and its raw value text.
    pub fn parse(action: UpdateAction, raw_value: &str) -> Result<Self, BookValidationError> {
        match action {
            UpdateAction::Status => Ok(Self::Status(raw_value.parse()?)),
            UpdateAction::Genres => Ok(Self::Genres(parse_genres(raw_value))),
        }
    }
}

/// Ordered in-memory collection of books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRepository {
    books: Vec<Book>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously loaded books without re-validating them.
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books in insertion order.
    pub fn as_slice(&self) -> &[Book] {
        &self.books
    }

    pub fn into_vec(self) -> Vec<Book> {
        self.books
    }

    pub fn contains(&self, key: &BookKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &BookKey) -> Option<&Book> {
        self.books.iter().find(|book| book.matches(key))
    }

    /// First book whose title matches case-insensitively, ignoring author.
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        let wanted = title.trim().to_lowercase();
        self.books
            .iter()
            .find(|book| book.title.trim().to_lowercase() == wanted)
    }

    /// Validates and appends a new book.
    ///
    /// # Errors
    /// - `DuplicateBook` when the identity key is already taken.
    /// - `Book(_)` for any field validation failure.
    pub fn add(&mut self, draft: &BookDraft) -> RepoResult<&Book> {
        let key = draft.key();
        if self.contains(&key) {
            return Err(RepoError::DuplicateBook(key));
        }

        let book = draft.validate()?;
        let index = self.books.len();
        self.books.push(book);
        Ok(&self.books[index])
    }

    /// All books sorted by year, keeping insertion order among equal years.
    pub fn view_all(&self) -> Vec<&Book> {
        let mut sorted: Vec<&Book> = self.books.iter().collect();
        sorted.sort_by_key(|book| book.year);
        sorted
    }

    /// Filters books by genre membership or status name.
    pub fn search(&self, field: SearchField, query: &str) -> Vec<&Book> {
        match field {
            SearchField::Genre => match normalize_genre(query) {
                Some(genre) => self
                    .books
                    .iter()
                    .filter(|book| book.has_genre(&genre))
                    .collect(),
                None => Vec::new(),
            },
            SearchField::Status => {
                let wanted = query.trim().to_lowercase();
                self.books
                    .iter()
                    .filter(|book| book.status.as_str() == wanted)
                    .collect()
            }
        }
    }

    /// Applies `update` to the book identified by `key`.
    pub fn update(&mut self, key: &BookKey, update: BookUpdate) -> RepoResult<&Book> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.matches(key))
            .ok_or_else(|| RepoError::BookNotFound(key.clone()))?;

        match update {
            BookUpdate::Status(status) => book.status = status,
            BookUpdate::Genres(genres) => book.add_genres(genres),
        }
        Ok(book)
    }

    /// Removes and returns the book identified by `key`.
    ///
    /// Quotes referring to the removed book are left untouched.
    pub fn delete(&mut self, key: &BookKey) -> RepoResult<Book> {
        let index = self
            .books
            .iter()
            .position(|book| book.matches(key))
            .ok_or_else(|| RepoError::BookNotFound(key.clone()))?;
        Ok(self.books.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{BookRepository, BookUpdate, UpdateAction};
    use crate::model::book::{BookDraft, BookKey, BookValidationError, ReadingStatus};

    fn draft(title: &str, year: &str) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: "Author".to_string(),
            year: year.to_string(),
            genres: "fiction".to_string(),
            status: "reading".to_string(),
        }
    }

    #[test]
    fn view_all_is_stable_for_equal_years() {
        let mut repo = BookRepository::new();
        repo.add(&draft("b", "1990")).unwrap();
        repo.add(&draft("a", "1980")).unwrap();
        repo.add(&draft("c", "1990")).unwrap();

        let titles: Vec<_> = repo
            .view_all()
            .into_iter()
            .map(|book| book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn update_action_parses_known_values_only() {
        assert_eq!(" Genres ".parse::<UpdateAction>().unwrap(), UpdateAction::Genres);
        assert_eq!(
            "title".parse::<UpdateAction>().unwrap_err(),
            BookValidationError::InvalidUpdateAction("title".to_string())
        );
    }

    #[test]
    fn invalid_status_update_is_rejected_before_lookup() {
        let err = BookUpdate::parse(UpdateAction::Status, "done").unwrap_err();
        assert_eq!(err, BookValidationError::InvalidStatus("done".to_string()));
    }

    #[test]
    fn status_update_replaces_status() {
        let mut repo = BookRepository::new();
        repo.add(&draft("Dune", "1965")).unwrap();

        let key = BookKey::new("DUNE", "author");
        let updated = repo
            .update(&key, BookUpdate::Status(ReadingStatus::Completed))
            .unwrap();
        assert_eq!(updated.status, ReadingStatus::Completed);
    }
}
