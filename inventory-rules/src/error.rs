//! Error types for inventory validation.
//!
//! Two distinct families:
//! - [`ValidationFailure`]: the tree being checked breaks a rule. Collected
//!   and reported; never aborts a run.
//! - [`InventoryError`]: the check itself could not run (missing root,
//!   unreadable directory, ...). Aborts the run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The rule a [`ValidationFailure`] was raised by.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum FailureKind {
    /// The directory has no inventory document.
    MissingInventory,
    /// The folder description is shorter than the configured minimum.
    FolderDescriptionTooShort,
    /// A real child of the directory is not documented.
    UndocumentedItem,
    /// A documented name does not exist in the directory.
    StaleEntry,
    /// An entry's description is shorter than the configured minimum.
    EntryDescriptionTooShort,
    /// An entry repeats the description of an earlier entry.
    DuplicateDescription,
}

impl FailureKind {
    /// Stable kebab-case code used in human-readable output.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingInventory => "missing-inventory",
            Self::FolderDescriptionTooShort => "folder-description-too-short",
            Self::UndocumentedItem => "undocumented-item",
            Self::StaleEntry => "stale-entry",
            Self::EntryDescriptionTooShort => "entry-description-too-short",
            Self::DuplicateDescription => "duplicate-description",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single rule violation found in one directory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationFailure {
    /// Directory path relative to the walk root (`.` for the root itself).
    pub directory: PathBuf,
    /// The violated rule.
    pub kind: FailureKind,
    /// Child or entry name the failure is about, when the rule concerns one.
    pub subject: Option<String>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ValidationFailure {
    /// Create a failure for `directory`.
    #[must_use]
    pub fn new(
        directory: impl Into<PathBuf>,
        kind: FailureKind,
        subject: Option<&str>,
        message: String,
    ) -> Self {
        Self {
            directory: directory.into(),
            kind,
            subject: subject.map(str::to_owned),
            message,
        }
    }

    /// Format the failure for human-readable output.
    ///
    /// `{directory}: [{code}] {message}`
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "{}: [{}] {}",
            self.directory.display(),
            self.kind,
            self.message
        )
    }
}

/// An operational error: the check itself could not be completed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InventoryError {
    /// The root path does not exist.
    #[error("Root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("Root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// A directory traversal error (permission denied, loop detected, ...).
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An I/O error while listing a directory or reading a file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory lies deeper than the configured walk depth.
    #[error("{} is deeper than the maximum walk depth of {limit}", path.display())]
    DepthLimitExceeded { path: PathBuf, limit: usize },

    /// An inventory file exceeded the configured size limit.
    #[error("{} exceeds maximum size of {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, limit: u64 },

    /// An inventory file is not valid UTF-8.
    #[error("{} is not valid UTF-8", .0.display())]
    InvalidEncoding(PathBuf),

    /// An exclude glob pattern could not be parsed.
    #[error("Invalid exclude glob pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The root-level inventory list is missing.
    #[error("Root inventory is missing: {}", .0.display())]
    RootInventoryMissing(PathBuf),
}

impl InventoryError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
