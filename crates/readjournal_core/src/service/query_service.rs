//! Read-only aggregate queries over books and quotes.
//!
//! # Responsibility
//! - Compute completion-by-year, most-quoted book and most-prolific author.
//!
//! # Invariants
//! - Queries never mutate either repository.
//! - Tallies compare titles and authors case-insensitively.
//! - Ties for the most-quoted book resolve to the smallest lower-cased title.

use crate::model::book::{Book, ReadingStatus};
use crate::model::quote::Quote;
use crate::repo::book_repo::BookRepository;
use std::collections::HashMap;

/// Result of `book_with_most_quotes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostQuotedBook {
    /// Lower-cased title the quotes were tallied under.
    pub title: String,
    /// Author of the first book with this title, if one still exists.
    pub author: Option<String>,
    pub count: usize,
}

/// Result of `authors_with_most_entries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopAuthors {
    /// Tied authors in first-occurrence order, spelled as first seen.
    pub authors: Vec<String>,
    pub count: usize,
}

/// Completed books published in `year`, in repository order.
pub fn completed_in_year(books: &BookRepository, year: i32) -> Vec<&Book> {
    books
        .as_slice()
        .iter()
        .filter(|book| book.status == ReadingStatus::Completed && book.year == year)
        .collect()
}

/// Book title with the highest quote count.
///
/// Returns `None` when there are no quotes.
pub fn book_with_most_quotes(quotes: &[Quote], books: &BookRepository) -> Option<MostQuotedBook> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for quote in quotes {
        *counts.entry(quote.book_title.trim().to_lowercase()).or_default() += 1;
    }

    let (title, count) = counts
        .into_iter()
        .max_by(|(left_title, left_count), (right_title, right_count)| {
            left_count
                .cmp(right_count)
                .then_with(|| right_title.cmp(left_title))
        })?;

    let author = books.find_by_title(&title).map(|book| book.author.clone());
    Some(MostQuotedBook {
        title,
        author,
        count,
    })
}

/// Every author tied for the most book entries.
///
/// Returns `None` when there are no books.
pub fn authors_with_most_entries(books: &[Book]) -> Option<TopAuthors> {
    // (lower-cased key, first spelling, count) in first-occurrence order.
    let mut tally: Vec<(String, String, usize)> = Vec::new();
    for book in books {
        let key = book.author.trim().to_lowercase();
        match tally.iter_mut().find(|(existing, _, _)| *existing == key) {
            Some((_, _, count)) => *count += 1,
            None => tally.push((key, book.author.trim().to_string(), 1)),
        }
    }

    let max = tally.iter().map(|(_, _, count)| *count).max()?;
    let authors = tally
        .into_iter()
        .filter(|(_, _, count)| *count == max)
        .map(|(_, spelling, _)| spelling)
        .collect();
    Some(TopAuthors {
        authors,
        count: max,
    })
}
