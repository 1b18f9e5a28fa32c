//! Journal runtime configuration.
//!
//! # Responsibility
//! - Resolve where the two collection files and the log directory live.
//! - Carry the load policy and log level chosen for one process.
//!
//! # Invariants
//! - All paths are derived from one data directory unless overridden.
//! - No environment variables or command-line flags are consulted.

use crate::logging::default_log_level;
use crate::store::json_file::JsonFileStore;
use std::path::{Path, PathBuf};

/// File holding the serialized book array.
pub const BOOKS_FILE_NAME: &str = "books.json";
/// File holding the serialized quote array.
pub const QUOTES_FILE_NAME: &str = "quotes.json";
/// Sub-directory of the data directory used for rolling logs.
pub const LOG_DIR_NAME: &str = "logs";

/// How `load` reacts to an unreadable or unparsable collection file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Report the problem and continue with an empty collection for that file.
    #[default]
    Lenient,
    /// Fail the whole load with the first error.
    Strict,
}

/// Paths and policies for one journal process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub data_dir: PathBuf,
    pub books_file: PathBuf,
    pub quotes_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
    pub load_policy: LoadPolicy,
}

impl JournalConfig {
    /// Default layout rooted at `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            books_file: data_dir.join(BOOKS_FILE_NAME),
            quotes_file: data_dir.join(QUOTES_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level: default_log_level(),
            load_policy: LoadPolicy::default(),
            data_dir,
        }
    }

    /// Default layout rooted at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::in_dir(std::env::current_dir()?))
    }

    pub fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    /// Builds the JSON file store described by this configuration.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.books_file, &self.quotes_file).with_policy(self.load_policy)
    }
}
