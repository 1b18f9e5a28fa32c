use readjournal_core::{
    authors_with_most_entries, BookDraft, BookKey, Journal, QuoteDraft, QuoteValidationError,
    RepoError,
};
use std::convert::Infallible;

fn book(title: &str, author: &str, year: &str, status: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        author: author.to_string(),
        year: year.to_string(),
        genres: "fiction".to_string(),
        status: status.to_string(),
    }
}

fn quote(title: &str, author: &str, text: &str, page: &str) -> QuoteDraft {
    QuoteDraft {
        book_title: title.to_string(),
        author: author.to_string(),
        text: text.to_string(),
        page: page.to_string(),
    }
}

#[test]
fn quote_for_unknown_book_is_rejected() {
    let mut journal = Journal::new();
    let err = journal
        .add_quote(&quote("Unknown Book", "Nobody", "words", "1"))
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::BookNotFound(BookKey::new("unknown book", "nobody"))
    );
    assert_eq!(err.to_string(), "Book not found.");
    assert!(journal.quotes().is_empty());
}

#[test]
fn quote_validation_rejects_empty_text_and_bad_pages() {
    let mut journal = Journal::new();
    journal
        .add_book(&book("Dune", "Frank Herbert", "1965", "completed"))
        .unwrap();

    let empty = journal
        .add_quote(&quote("Dune", "Frank Herbert", "   ", "3"))
        .unwrap_err();
    assert_eq!(empty, RepoError::Quote(QuoteValidationError::EmptyText));

    let zero = journal
        .add_quote(&quote("Dune", "Frank Herbert", "spice", "0"))
        .unwrap_err();
    assert_eq!(zero, RepoError::Quote(QuoteValidationError::PageNotPositive(0)));

    let text_page = journal
        .add_quote(&quote("Dune", "Frank Herbert", "spice", "ten"))
        .unwrap_err();
    assert!(matches!(
        text_page,
        RepoError::Quote(QuoteValidationError::PageNotInteger(_))
    ));
    assert!(journal.quotes().is_empty());
}

#[test]
fn quote_search_is_case_insensitive_substring() {
    let mut journal = Journal::new();
    journal
        .add_book(&book("Dune", "Frank Herbert", "1965", "completed"))
        .unwrap();
    journal
        .add_quote(&quote("Dune", "Frank Herbert", "Fear is the Mind-Killer.", "8"))
        .unwrap();
    journal
        .add_quote(&quote("Dune", "Frank Herbert", "The spice must flow.", "20"))
        .unwrap();

    let hits = journal.quotes().search("MIND");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].page_number, 8);
    assert!(journal.quotes().search("sandworm").is_empty());
}

#[test]
fn declined_delete_keeps_every_quote() {
    let mut journal = Journal::new();
    journal
        .add_book(&book("Dune", "Frank Herbert", "1965", "completed"))
        .unwrap();
    journal
        .add_quote(&quote("Dune", "Frank Herbert", "The spice must flow.", "20"))
        .unwrap();

    let removed = journal
        .delete_quote("spice", |_| Ok::<_, Infallible>(false))
        .unwrap();
    assert!(removed.is_none());
    assert_eq!(journal.quotes().len(), 1);
}

#[test]
fn deleting_a_book_leaves_its_quotes_dangling() {
    let mut journal = Journal::new();
    journal
        .add_book(&book("Dune", "Frank Herbert", "1965", "completed"))
        .unwrap();
    journal
        .add_quote(&quote("Dune", "Frank Herbert", "The spice must flow.", "20"))
        .unwrap();

    journal
        .delete_book(&BookKey::new("Dune", "Frank Herbert"))
        .unwrap();
    assert!(journal.books().is_empty());
    assert_eq!(journal.quotes().len(), 1);

    let top = journal.book_with_most_quotes().unwrap();
    assert_eq!(top.title, "dune");
    assert_eq!(top.author, None);
}

#[test]
fn book_with_most_quotes_counts_by_title() {
    let mut journal = Journal::new();
    journal
        .add_book(&book("Dune", "Frank Herbert", "1965", "completed"))
        .unwrap();
    journal
        .add_book(&book("1984", "George Orwell", "1949", "completed"))
        .unwrap();
    journal
        .add_quote(&quote("Dune", "Frank Herbert", "one", "1"))
        .unwrap();
    journal
        .add_quote(&quote("1984", "George Orwell", "two", "2"))
        .unwrap();
    journal
        .add_quote(&quote("dune", "frank herbert", "three", "3"))
        .unwrap();

    let top = journal.book_with_most_quotes().unwrap();
    assert_eq!(top.title, "dune");
    assert_eq!(top.author.as_deref(), Some("Frank Herbert"));
    assert_eq!(top.count, 2);
}

#[test]
fn book_with_most_quotes_is_none_without_quotes() {
    let journal = Journal::new();
    assert!(journal.book_with_most_quotes().is_none());
}

#[test]
fn authors_with_most_entries_returns_single_leader() {
    let mut journal = Journal::new();
    for title in ["One", "Two", "Three"] {
        journal
            .add_book(&book(title, "Author A", "2000", "reading"))
            .unwrap();
    }
    for title in ["Four", "Five"] {
        journal
            .add_book(&book(title, "Author B", "2000", "reading"))
            .unwrap();
    }

    let top = journal.authors_with_most_entries().unwrap();
    assert_eq!(top.authors, vec!["Author A".to_string()]);
    assert_eq!(top.count, 3);
}

#[test]
fn authors_with_most_entries_returns_all_tied_authors() {
    let mut journal = Journal::new();
    journal.add_book(&book("One", "Author A", "2000", "reading")).unwrap();
    journal.add_book(&book("Two", "author b", "2000", "reading")).unwrap();
    journal.add_book(&book("Three", "AUTHOR A", "2000", "reading")).unwrap();
    journal.add_book(&book("Four", "Author B", "2000", "reading")).unwrap();

    let top = journal.authors_with_most_entries().unwrap();
    assert_eq!(
        top.authors,
        vec!["Author A".to_string(), "author b".to_string()]
    );
    assert_eq!(top.count, 2);
    assert!(authors_with_most_entries(&[]).is_none());
}

#[test]
fn completed_in_year_filters_status_and_year() {
    let mut journal = Journal::new();
    journal
        .add_book(&book("Dune", "Frank Herbert", "1965", "completed"))
        .unwrap();
    journal
        .add_book(&book("Other", "Someone", "1965", "reading"))
        .unwrap();
    journal
        .add_book(&book("1984", "George Orwell", "1949", "completed"))
        .unwrap();

    let hits = journal.completed_in_year(1965);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Dune");
    assert!(journal.completed_in_year(2001).is_empty());
}
