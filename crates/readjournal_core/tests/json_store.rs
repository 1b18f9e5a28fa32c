use readjournal_core::{
    BookDraft, Journal, JournalConfig, JournalStore, JsonFileStore, LoadPolicy, QuoteDraft,
    StoreError,
};
use std::fs;

fn sample_journal() -> Journal {
    let mut journal = Journal::new();
    for (title, author, year, genres) in [
        ("Dune", "Frank Herbert", "1965", "sci-fi, classic"),
        ("1984", "George Orwell", "1949", "dystopia"),
        ("Emma", "Jane Austen", "1815", ""),
    ] {
        journal
            .add_book(&BookDraft {
                title: title.to_string(),
                author: author.to_string(),
                year: year.to_string(),
                genres: genres.to_string(),
                status: "completed".to_string(),
            })
            .unwrap();
    }
    journal
        .add_quote(&QuoteDraft {
            book_title: "dune".to_string(),
            author: "frank herbert".to_string(),
            text: "Fear is the mind-killer.".to_string(),
            page: "8".to_string(),
        })
        .unwrap();
    journal
}

#[test]
fn missing_files_load_as_empty_collections() {
    let dir = tempfile::tempdir().unwrap();
    let store = JournalConfig::in_dir(dir.path()).store();

    let outcome = store.load().unwrap();
    assert!(outcome.books.is_empty());
    assert!(outcome.quotes.is_empty());
    assert!(outcome.is_clean());
}

#[test]
fn save_then_load_round_trips_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JournalConfig::in_dir(dir.path()).store();
    let journal = sample_journal();

    store
        .save(journal.books().as_slice(), journal.quotes().as_slice())
        .unwrap();
    let outcome = store.load().unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.books, journal.books().as_slice());
    assert_eq!(outcome.quotes, journal.quotes().as_slice());
}

#[test]
fn saved_files_use_expected_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = JournalConfig::in_dir(dir.path());
    let journal = sample_journal();
    config
        .store()
        .save(journal.books().as_slice(), journal.quotes().as_slice())
        .unwrap();

    let books: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.books_file).unwrap()).unwrap();
    assert_eq!(books[0]["title"], "Dune");
    assert_eq!(books[0]["author"], "Frank Herbert");
    assert_eq!(books[0]["year"], 1965);
    assert_eq!(books[0]["genres"], serde_json::json!(["classic", "sci-fi"]));
    assert_eq!(books[0]["status"], "completed");

    let quotes: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.quotes_file).unwrap()).unwrap();
    assert_eq!(quotes[0]["book_title"], "Dune");
    assert_eq!(quotes[0]["author"], "Frank Herbert");
    assert_eq!(quotes[0]["page_number"], 8);
}

#[test]
fn loads_hand_written_files_with_on_hold_status() {
    let dir = tempfile::tempdir().unwrap();
    let config = JournalConfig::in_dir(dir.path());
    fs::write(
        &config.books_file,
        r#"[{"title": "dune", "author": "frank herbert", "year": 1965,
             "genres": ["sci-fi", "sci-fi", "classic"], "status": "on hold"}]"#,
    )
    .unwrap();

    let outcome = config.store().load().unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.books.len(), 1);
    assert_eq!(outcome.books[0].genres.len(), 2);
    assert_eq!(outcome.books[0].status.label(), "On Hold");
}

#[test]
fn corrupt_file_degrades_to_empty_collection_when_lenient() {
    let dir = tempfile::tempdir().unwrap();
    let config = JournalConfig::in_dir(dir.path());
    let journal = sample_journal();
    config
        .store()
        .save(journal.books().as_slice(), journal.quotes().as_slice())
        .unwrap();
    fs::write(&config.books_file, "{ not json").unwrap();

    let outcome = config.store().load().unwrap();
    assert!(outcome.books.is_empty());
    assert_eq!(outcome.quotes.len(), 1);
    assert_eq!(outcome.issues.len(), 1);
    assert!(matches!(outcome.issues[0], StoreError::Parse { .. }));
    assert_eq!(outcome.issues[0].path(), config.books_file.as_path());
}

#[test]
fn corrupt_file_fails_load_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    let config = JournalConfig::in_dir(dir.path()).with_load_policy(LoadPolicy::Strict);
    fs::write(&config.quotes_file, "[{\"text\": 1}]").unwrap();

    let err = config.store().load().unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
    assert!(err.to_string().contains("quotes.json"));
}

#[test]
fn save_creates_missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("journal");
    let store = JsonFileStore::new(nested.join("b.json"), nested.join("q.json"));

    store.save(&[], &[]).unwrap();
    assert_eq!(fs::read_to_string(nested.join("b.json")).unwrap(), "[]");
    assert_eq!(fs::read_to_string(nested.join("q.json")).unwrap(), "[]");
}

#[test]
fn save_reports_unwritable_target() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the books file should be makes the write fail.
    let books_path = dir.path().join("books.json");
    fs::create_dir(&books_path).unwrap();
    let store = JsonFileStore::new(&books_path, dir.path().join("quotes.json"));

    let err = store.save(&[], &[]).unwrap_err();
    assert!(matches!(err, StoreError::Io { action: "write", .. }));
    assert!(!dir.path().join("quotes.json").exists());
}
