//! Text rendering for session listings.

use crate::model::book::Book;
use crate::model::quote::Quote;
use std::collections::BTreeSet;

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter that follows a non-letter, so `"o'brien"`
/// becomes `"O'Brien"` and `"2nd"` becomes `"2Nd"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

pub fn genre_list(genres: &BTreeSet<String>) -> String {
    genres.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Full one-line listing of a book.
pub fn book_line(book: &Book) -> String {
    format!(
        "Title: {}, Author: {}, Year: {}, Genres: {}, Status: {}",
        title_case(&book.title),
        title_case(&book.author),
        book.year,
        genre_list(&book.genres),
        book.status.label()
    )
}

/// Short listing used by the completed-in-year query.
pub fn completed_book_line(book: &Book) -> String {
    format!(
        "Title: {}, Author: {}, Genres: {}",
        title_case(&book.title),
        title_case(&book.author),
        genre_list(&book.genres)
    )
}

/// Two-line listing of a quote followed by a blank separator line.
pub fn quote_block(quote: &Quote) -> String {
    format!(
        "Quote: {}\nFrom: {} by {}, Page: {}\n",
        quote.text,
        title_case(&quote.book_title),
        title_case(&quote.author),
        quote.page_number
    )
}
