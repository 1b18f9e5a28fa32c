//! Interactive menu loop over a reading journal.
//!
//! # Responsibility
//! - Load the journal, dispatch numbered menu choices, save on exit.
//! - Turn raw prompt answers into typed requests for the journal service.
//!
//! # Invariants
//! - Domain errors end only the current menu action, never the session.
//! - The journal is saved exactly once, when the session ends.
//! - End of input ends the session the same way as "Save and exit".

use crate::model::book::{
    parse_year, parse_year_query, BookDraft, BookKey, ReadingStatus, SearchField,
};
use crate::model::quote::{parse_page_number, parse_quote_text, QuoteDraft, QuoteSortKey};
use crate::repo::book_repo::{BookUpdate, UpdateAction};
use crate::repo::RepoError;
use crate::service::journal_service::Journal;
use crate::store::{JournalStore, StoreError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

pub mod render;

use render::{book_line, completed_book_line, quote_block, title_case};

pub type SessionResult<T> = Result<T, SessionError>;

/// Failure that ends a session.
#[derive(Debug)]
pub enum SessionError {
    /// Reading the prompt input or writing output failed.
    Io(io::Error),
    /// Strict load refused to start the session.
    Load(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
            Self::Load(err) => write!(f, "failed to load journal: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Load(err) => Some(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Whether the final save succeeded.
    pub saved: bool,
}

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ViewBooks,
    SearchBooks,
    UpdateBook,
    DeleteBook,
    AddQuote,
    ViewQuotes,
    SearchQuotes,
    DeleteQuote,
    CompletedInYear,
    MostQuotedBook,
    TopAuthors,
    SaveAndExit,
}

const MENU: [(MenuChoice, &str); 13] = [
    (MenuChoice::AddBook, "Add a new Book"),
    (MenuChoice::ViewBooks, "View all Books"),
    (MenuChoice::SearchBooks, "Search Books by Genre or Status"),
    (MenuChoice::UpdateBook, "Update a Book"),
    (MenuChoice::DeleteBook, "Delete a Book"),
    (MenuChoice::AddQuote, "Add a new Quote"),
    (MenuChoice::ViewQuotes, "View all Quotes"),
    (MenuChoice::SearchQuotes, "Search Quotes by keyword"),
    (MenuChoice::DeleteQuote, "Delete a Quote"),
    (MenuChoice::CompletedInYear, "List Books completed in a year"),
    (MenuChoice::MostQuotedBook, "Book with most Quotes"),
    (MenuChoice::TopAuthors, "Authors with most entries"),
    (MenuChoice::SaveAndExit, "Save and exit"),
];

impl MenuChoice {
    /// Parses a 1-based menu number.
    pub fn parse(raw: &str) -> Option<Self> {
        let number = raw.trim().parse::<usize>().ok()?;
        let index = number.checked_sub(1)?;
        MENU.get(index).map(|(choice, _)| *choice)
    }

    /// 1-based menu number.
    pub fn number(self) -> usize {
        MENU.iter()
            .position(|(choice, _)| *choice == self)
            .map_or(0, |index| index + 1)
    }
}

/// Interactive session bound to one input, one output and one store.
pub struct Session<R, W, S> {
    input: R,
    output: W,
    store: S,
    journal: Journal,
}

impl<R: BufRead, W: Write, S: JournalStore> Session<R, W, S> {
    pub fn new(input: R, output: W, store: S) -> Self {
        Self {
            input,
            output,
            store,
            journal: Journal::new(),
        }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loads the journal and runs the menu loop until exit or end of input.
    ///
    /// # Errors
    /// - `SessionError::Load` when a strict store refuses to load.
    /// - `SessionError::Io` when the prompt streams fail.
    pub fn run(&mut self) -> SessionResult<SessionSummary> {
        self.load()?;
        info!(
            "event=session_start module=session status=ok books={} quotes={}",
            self.journal.books().len(),
            self.journal.quotes().len()
        );

        loop {
            self.print_menu()?;
            let Some(raw) = self.ask("Enter your choice (1-13): ")? else {
                writeln!(self.output)?;
                return self.save_and_exit();
            };
            let Some(choice) = MenuChoice::parse(&raw) else {
                writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between 1 and 13."
                )?;
                continue;
            };

            debug!(
                "event=menu_choice module=session choice={}",
                choice.number()
            );
            match choice {
                MenuChoice::AddBook => self.add_book()?,
                MenuChoice::ViewBooks => self.view_books()?,
                MenuChoice::SearchBooks => self.search_books()?,
                MenuChoice::UpdateBook => self.update_book()?,
                MenuChoice::DeleteBook => self.delete_book()?,
                MenuChoice::AddQuote => self.add_quote()?,
                MenuChoice::ViewQuotes => self.view_quotes()?,
                MenuChoice::SearchQuotes => self.search_quotes()?,
                MenuChoice::DeleteQuote => self.delete_quote()?,
                MenuChoice::CompletedInYear => self.completed_in_year()?,
                MenuChoice::MostQuotedBook => self.most_quoted_book()?,
                MenuChoice::TopAuthors => self.top_authors()?,
                MenuChoice::SaveAndExit => return self.save_and_exit(),
            }
        }
    }

    fn load(&mut self) -> SessionResult<()> {
        let outcome = self.store.load().map_err(SessionError::Load)?;
        if outcome.is_clean() {
            writeln!(self.output, "Data loaded successfully!")?;
        } else {
            for issue in &outcome.issues {
                writeln!(self.output, "Error loading data: {issue}")?;
            }
        }
        self.journal = Journal::from_parts(outcome.books, outcome.quotes);
        Ok(())
    }

    fn save_and_exit(&mut self) -> SessionResult<SessionSummary> {
        let saved = match self.store.save(
            self.journal.books().as_slice(),
            self.journal.quotes().as_slice(),
        ) {
            Ok(()) => {
                writeln!(self.output, "Data saved successfully!")?;
                true
            }
            Err(err) => {
                writeln!(self.output, "Error saving data: {err}")?;
                false
            }
        };
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;

        info!("event=session_end module=session status=ok saved={saved}");
        Ok(SessionSummary { saved })
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nPersonal Reading Journal Menu:")?;
        for (index, (_, label)) in MENU.iter().enumerate() {
            writeln!(self.output, "{}. {label}", index + 1)?;
        }
        Ok(())
    }

    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        prompt(&mut self.input, &mut self.output, message)
    }

    fn add_book(&mut self) -> SessionResult<()> {
        let Some(title) = self.ask("Enter Book Title: ")? else {
            return Ok(());
        };
        let Some(author) = self.ask("Enter Author: ")? else {
            return Ok(());
        };
        let key = BookKey::new(&title, &author);
        if self.journal.books().contains(&key) {
            writeln!(self.output, "{}", RepoError::DuplicateBook(key))?;
            return Ok(());
        }

        let Some(year) = self.ask("Enter year published: ")? else {
            return Ok(());
        };
        if let Err(err) = parse_year(&year) {
            writeln!(self.output, "{err}")?;
            return Ok(());
        }

        let Some(genres) = self.ask("Enter genres (comma-separated): ")? else {
            return Ok(());
        };
        let Some(status) = self.ask("Enter status (reading/completed/on hold): ")? else {
            return Ok(());
        };
        if let Err(err) = status.parse::<ReadingStatus>() {
            writeln!(self.output, "{err}")?;
            return Ok(());
        }

        let draft = BookDraft {
            title,
            author,
            year,
            genres,
            status,
        };
        match self.journal.add_book(&draft) {
            Ok(_) => writeln!(self.output, "Book added successfully!")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn view_books(&mut self) -> SessionResult<()> {
        let books = self.journal.view_books();
        if books.is_empty() {
            writeln!(self.output, "No books found.")?;
            return Ok(());
        }

        writeln!(self.output, "\nBook List (Sorted by Year):")?;
        for book in books {
            writeln!(self.output, "{}", book_line(book))?;
        }
        Ok(())
    }

    fn search_books(&mut self) -> SessionResult<()> {
        let Some(raw_field) = self.ask("Search by (Genre/Status): ")? else {
            return Ok(());
        };
        let field = match raw_field.parse::<SearchField>() {
            Ok(field) => field,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        let Some(query) = self.ask(&format!("Enter {}: ", field.as_str()))? else {
            return Ok(());
        };
        let hits = self.journal.books().search(field, &query);
        if hits.is_empty() {
            writeln!(
                self.output,
                "No Books found with {} '{}'.",
                field.as_str(),
                query.to_lowercase()
            )?;
            return Ok(());
        }
        for book in hits {
            writeln!(self.output, "{}", book_line(book))?;
        }
        Ok(())
    }

    fn update_book(&mut self) -> SessionResult<()> {
        let Some(title) = self.ask("Enter Book Title to update: ")? else {
            return Ok(());
        };
        let Some(author) = self.ask("Enter Author: ")? else {
            return Ok(());
        };
        let key = BookKey::new(&title, &author);
        let Some(book) = self.journal.books().get(&key) else {
            writeln!(self.output, "{}", RepoError::BookNotFound(key))?;
            return Ok(());
        };
        let found = format!(
            "Found: {} by {}",
            title_case(&book.title),
            title_case(&book.author)
        );
        writeln!(self.output, "{found}")?;

        let Some(raw_action) = self.ask("Update (status/genres): ")? else {
            return Ok(());
        };
        let action = match raw_action.parse::<UpdateAction>() {
            Ok(action) => action,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        let message = match action {
            UpdateAction::Status => "Enter new Status (reading/completed/on hold): ",
            UpdateAction::Genres => "Enter Genres to add (comma-separated): ",
        };
        let Some(raw_value) = self.ask(message)? else {
            return Ok(());
        };
        let update = match BookUpdate::parse(action, &raw_value) {
            Ok(update) => update,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        match self.journal.update_book(&key, update) {
            Ok(_) => match action {
                UpdateAction::Status => writeln!(self.output, "Status updated!")?,
                UpdateAction::Genres => writeln!(self.output, "Genres updated!")?,
            },
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn delete_book(&mut self) -> SessionResult<()> {
        let Some(title) = self.ask("Enter Book Title to delete: ")? else {
            return Ok(());
        };
        let Some(author) = self.ask("Enter Author: ")? else {
            return Ok(());
        };

        match self.journal.delete_book(&BookKey::new(&title, &author)) {
            Ok(_) => writeln!(self.output, "Book deleted successfully!")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn add_quote(&mut self) -> SessionResult<()> {
        let Some(book_title) = self.ask("Enter Book Title for quote: ")? else {
            return Ok(());
        };
        let Some(author) = self.ask("Enter Author: ")? else {
            return Ok(());
        };
        let key = BookKey::new(&book_title, &author);
        if !self.journal.books().contains(&key) {
            writeln!(
                self.output,
                "{} Please add the book first.",
                RepoError::BookNotFound(key)
            )?;
            return Ok(());
        }

        let Some(text) = self.ask("Enter Quote: ")? else {
            return Ok(());
        };
        if let Err(err) = parse_quote_text(&text) {
            writeln!(self.output, "{err}")?;
            return Ok(());
        }

        let Some(page) = self.ask("Enter page number: ")? else {
            return Ok(());
        };
        if let Err(err) = parse_page_number(&page) {
            writeln!(self.output, "{err}")?;
            return Ok(());
        }

        let draft = QuoteDraft {
            book_title,
            author,
            text,
            page,
        };
        match self.journal.add_quote(&draft) {
            Ok(_) => writeln!(self.output, "Quote added successfully!")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn view_quotes(&mut self) -> SessionResult<()> {
        if self.journal.quotes().is_empty() {
            writeln!(self.output, "No Quotes found.")?;
            return Ok(());
        }

        let Some(raw_sort) = self.ask("Sort by (Book/Author): ")? else {
            return Ok(());
        };
        let (sort_by, defaulted) = QuoteSortKey::parse_or_default(&raw_sort);
        if defaulted {
            writeln!(self.output, "Invalid sort option. Using default (Book).")?;
        }

        writeln!(self.output, "\nQuote List:")?;
        for quote in self.journal.view_quotes(sort_by) {
            writeln!(self.output, "{}", quote_block(quote))?;
        }
        Ok(())
    }

    fn search_quotes(&mut self) -> SessionResult<()> {
        let Some(keyword) = self.ask("Enter keyword to search: ")? else {
            return Ok(());
        };

        let hits = self.journal.quotes().search(&keyword);
        if hits.is_empty() {
            writeln!(
                self.output,
                "No Quotes found with keyword '{}'.",
                keyword.to_lowercase()
            )?;
            return Ok(());
        }
        for quote in hits {
            writeln!(self.output, "{}", quote_block(quote))?;
        }
        Ok(())
    }

    fn delete_quote(&mut self) -> SessionResult<()> {
        let Some(fragment) = self.ask("Enter Quote text to delete (or part of it): ")? else {
            return Ok(());
        };

        let Self {
            input,
            output,
            journal,
            ..
        } = self;
        let removed = journal.delete_quote(&fragment, |quote| {
            writeln!(
                output,
                "Found: {} (From: {})",
                quote.text,
                title_case(&quote.book_title)
            )?;
            let answer = prompt(&mut *input, &mut *output, "Delete this quote? (y/n): ")?;
            Ok::<_, io::Error>(answer.is_some_and(|value| is_affirmative(&value)))
        })?;

        match removed {
            Some(_) => writeln!(output, "Quote deleted successfully!")?,
            None => writeln!(output, "Quote not found.")?,
        }
        Ok(())
    }

    fn completed_in_year(&mut self) -> SessionResult<()> {
        let Some(raw_year) = self.ask("Enter year: ")? else {
            return Ok(());
        };
        let year = match parse_year_query(&raw_year) {
            Ok(year) => year,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        let books = self.journal.completed_in_year(year);
        if books.is_empty() {
            writeln!(self.output, "No Books completed in {year}.")?;
            return Ok(());
        }
        for book in books {
            writeln!(self.output, "{}", completed_book_line(book))?;
        }
        Ok(())
    }

    fn most_quoted_book(&mut self) -> SessionResult<()> {
        match self.journal.book_with_most_quotes() {
            Some(top) => writeln!(
                self.output,
                "Book with most Quotes: {} by {} ({} Quotes)",
                title_case(&top.title),
                top.author
                    .as_deref()
                    .map_or_else(|| "Unknown".to_string(), title_case),
                top.count
            )?,
            None => writeln!(self.output, "No Quotes found.")?,
        }
        Ok(())
    }

    fn top_authors(&mut self) -> SessionResult<()> {
        match self.journal.authors_with_most_entries() {
            Some(top) => {
                let names = top
                    .authors
                    .iter()
                    .map(|author| title_case(author))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    self.output,
                    "Author(s) with most entries ({} Books): {names}",
                    top.count
                )?;
            }
            None => writeln!(self.output, "No Books found.")?,
        }
        Ok(())
    }
}

/// Writes `message`, then reads one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::{is_affirmative, MenuChoice};

    #[test]
    fn menu_numbers_round_trip() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddBook));
        assert_eq!(MenuChoice::parse(" 13 "), Some(MenuChoice::SaveAndExit));
        assert_eq!(MenuChoice::SaveAndExit.number(), 13);
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("14"), None);
        assert_eq!(MenuChoice::parse("two"), None);
    }

    #[test]
    fn only_yes_answers_confirm() {
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }
}
