//! Whole-collection persistence for the reading journal.
//!
//! # Responsibility
//! - Define the storage contract used by the session loop.
//! - Describe load/save failures with the path that caused them.
//!
//! # Invariants
//! - A missing collection file is an empty collection, not an error.
//! - Saving always writes the complete collections; there is no partial save.
//! - Store failures never panic.

use crate::model::book::Book;
use crate::model::quote::Quote;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Reading, writing or creating a file failed.
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a valid collection.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// In-memory records could not be serialized.
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Encode { path, .. } => {
                path.as_path()
            }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                action,
                path,
                source,
            } => write!(f, "failed to {action} `{}`: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "failed to parse `{}`: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "failed to encode records for `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Collections produced by a load, plus any per-file problems that were
/// downgraded to empty collections.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub books: Vec<Book>,
    pub quotes: Vec<Quote>,
    pub issues: Vec<StoreError>,
}

impl LoadOutcome {
    /// Returns `true` when every existing file loaded without problems.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Storage backend for both journal collections.
pub trait JournalStore {
    /// Loads both collections.
    ///
    /// Lenient stores report per-file problems inside `LoadOutcome::issues`;
    /// strict stores return the first problem as `Err`.
    fn load(&self) -> StoreResult<LoadOutcome>;

    /// Writes both collections, books first.
    fn save(&self, books: &[Book], quotes: &[Quote]) -> StoreResult<()>;
}
