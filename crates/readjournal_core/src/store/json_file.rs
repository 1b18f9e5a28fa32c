//! JSON file storage for the two journal collections.
//!
//! # Responsibility
//! - Read and write `books.json` / `quotes.json` as single JSON arrays.
//! - Apply the configured `LoadPolicy` to unreadable or corrupt files.
//!
//! # Invariants
//! - Files are written independently; there is no atomic swap, so a failed
//!   quotes write leaves a freshly written books file behind.
//! - Loaded records are not re-validated beyond their JSON shape.
//! - Every load/save emits `journal_load`/`journal_save` events with duration
//!   and status.

use super::{JournalStore, LoadOutcome, StoreError, StoreResult};
use crate::config::LoadPolicy;
use crate::model::book::Book;
use crate::model::quote::Quote;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File-backed `JournalStore` using pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    books_path: PathBuf,
    quotes_path: PathBuf,
    policy: LoadPolicy,
}

impl JsonFileStore {
    /// Creates a lenient store over the two given files.
    pub fn new(books_path: impl AsRef<Path>, quotes_path: impl AsRef<Path>) -> Self {
        Self {
            books_path: books_path.as_ref().to_path_buf(),
            quotes_path: quotes_path.as_ref().to_path_buf(),
            policy: LoadPolicy::Lenient,
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    pub fn quotes_path(&self) -> &Path {
        &self.quotes_path
    }

    fn load_one<T: DeserializeOwned>(
        &self,
        path: &Path,
        issues: &mut Vec<StoreError>,
    ) -> StoreResult<Vec<T>> {
        match read_collection(path) {
            Ok(records) => Ok(records),
            Err(err) => match self.policy {
                LoadPolicy::Strict => Err(err),
                LoadPolicy::Lenient => {
                    warn!(
                        "event=journal_load module=store status=degraded file={} error={}",
                        file_label(path),
                        err
                    );
                    issues.push(err);
                    Ok(Vec::new())
                }
            },
        }
    }
}

impl JournalStore for JsonFileStore {
    fn load(&self) -> StoreResult<LoadOutcome> {
        let started_at = Instant::now();
        info!("event=journal_load module=store status=start");

        let mut issues = Vec::new();
        let loaded = self
            .load_one::<Book>(&self.books_path, &mut issues)
            .and_then(|books| {
                let quotes = self.load_one::<Quote>(&self.quotes_path, &mut issues)?;
                Ok((books, quotes))
            });

        match loaded {
            Ok((books, quotes)) => {
                info!(
                    "event=journal_load module=store status=ok duration_ms={} books={} quotes={} issues={}",
                    started_at.elapsed().as_millis(),
                    books.len(),
                    quotes.len(),
                    issues.len()
                );
                Ok(LoadOutcome {
                    books,
                    quotes,
                    issues,
                })
            }
            Err(err) => {
                error!(
                    "event=journal_load module=store status=error duration_ms={} error_code=load_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, books: &[Book], quotes: &[Quote]) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=journal_save module=store status=start");

        let result = write_collection(&self.books_path, books)
            .and_then(|()| write_collection(&self.quotes_path, quotes));

        match &result {
            Ok(()) => info!(
                "event=journal_save module=store status=ok duration_ms={} books={} quotes={}",
                started_at.elapsed().as_millis(),
                books.len(),
                quotes.len()
            ),
            Err(err) => error!(
                "event=journal_save module=store status=error duration_ms={} error_code=save_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    let encoded = serde_json::to_string_pretty(records).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            action: "create directory for",
            path: path.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, encoded).map_err(|source| StoreError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}
