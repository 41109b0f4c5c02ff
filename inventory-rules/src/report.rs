//! Validation report types.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diff::NameDiff;
use crate::error::{FailureKind, ValidationFailure};

/// Result of a full inventory walk.
///
/// Only produced when the walk completed; operational errors never yield a
/// partial report.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct InventoryReport {
    /// The walk root as given.
    pub root: PathBuf,
    /// Number of directories validated.
    pub directories_checked: usize,
    /// Number of directories with at least one failure.
    pub failed_directories: usize,
    /// Whether every directory passed.
    pub ok: bool,
    /// Every failure, in walk order.
    pub failures: Vec<ValidationFailure>,
}

impl InventoryReport {
    /// Number of failures found.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.failures.len()
    }

    /// Failures raised by one rule.
    pub fn failures_of(&self, kind: FailureKind) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }

    /// Failures grouped by directory, preserving walk order.
    #[must_use]
    pub fn by_directory(&self) -> Vec<(&Path, &[ValidationFailure])> {
        self.failures
            .chunk_by(|a, b| a.directory == b.directory)
            .filter_map(|group| group.first().map(|f| (f.directory.as_path(), group)))
            .collect()
    }
}

/// Result of comparing the project root against its root-level inventory.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct RootInventoryReport {
    /// The root-level inventory file that was read.
    pub inventory: PathBuf,
    /// Root children absent from the inventory, and listed names absent from
    /// the root.
    #[serde(flatten)]
    pub diff: NameDiff,
    /// Whether the inventory is up to date.
    pub ok: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn failure(dir: &str, kind: FailureKind) -> ValidationFailure {
        ValidationFailure::new(dir, kind, None, String::new())
    }

    #[test]
    fn test_by_directory_keeps_walk_order() {
        let report = InventoryReport {
            root: PathBuf::from("."),
            directories_checked: 3,
            failed_directories: 2,
            ok: false,
            failures: vec![
                failure("b", FailureKind::MissingInventory),
                failure("a", FailureKind::FolderDescriptionTooShort),
                failure("a", FailureKind::StaleEntry),
            ],
        };

        let groups = report.by_directory();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Path::new("b"));
        assert_eq!(groups[1].0, Path::new("a"));
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(report.failures_of(FailureKind::StaleEntry).count(), 1);
        assert_eq!(report.errors_count(), 3);
    }
}
