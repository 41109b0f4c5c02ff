//! # inventory-rules
//!
//! Checks that every directory of a project tree carries an `inventory.md`
//! whose entries match the directory's real contents and whose descriptions
//! meet minimum quality thresholds.
//!
//! The pipeline is: [`TreeWalker`] yields directories, [`DirectoryValidator`]
//! checks each one against its parsed inventory document, and
//! [`validate_tree`] aggregates every failure into one [`InventoryReport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use inventory_rules::{InventoryConfig, validate_tree};
//!
//! let mut config = InventoryConfig::default();
//! config.walk.exclude = vec!["vendor".to_owned()];
//!
//! let report = validate_tree(Path::new("."), &config).unwrap();
//! println!("Directories checked: {}", report.directories_checked);
//! println!("Failures: {}", report.errors_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod diff;
mod directory;
mod error;
pub mod output;
mod report;
mod root_inventory;
mod walker;

use std::path::Path;

pub use config::{
    DEFAULT_IGNORE_NAMES, DEFAULT_INVENTORY_FILE_NAME, DEFAULT_ROOT_INVENTORY, InventoryConfig,
    ROOT_IGNORE_NAMES, RootInventoryConfig, RuleConfig, WalkConfig,
};
pub use diff::NameDiff;
pub use directory::{DirectorySnapshot, DirectoryValidator, check_document, read_inventory};
pub use error::{FailureKind, InventoryError, ValidationFailure};
pub use report::{InventoryReport, RootInventoryReport};
pub use root_inventory::{check_root_inventory, documented_root_names};
pub use walker::TreeWalker;

/// Validate the inventory documents of every directory under `root`.
///
/// This is the primary public API.
///
/// # Errors
///
/// Returns an error if `root` does not exist or is not a directory, if an
/// exclude pattern is invalid, or if any directory or inventory file cannot
/// be read during the walk. The walk stops at the first such error and no
/// partial report is returned.
pub fn validate_tree(
    root: &Path,
    config: &InventoryConfig,
) -> Result<InventoryReport, InventoryError> {
    if !root.exists() {
        return Err(InventoryError::RootNotFound(root.to_owned()));
    }
    if !root.is_dir() {
        return Err(InventoryError::RootNotDirectory(root.to_owned()));
    }

    let walker = TreeWalker::new(root, &config.walk)?;
    let validator = DirectoryValidator::new(config);

    let mut failures = Vec::new();
    let mut directories_checked: usize = 0;
    let mut failed_directories: usize = 0;

    for dir in walker.directories() {
        let dir = dir?;
        let label = match dir.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let dir_failures = validator.validate(&dir, &label)?;
        tracing::debug!(
            directory = %label.display(),
            failures = dir_failures.len(),
            "validated directory"
        );

        directories_checked += 1;
        if !dir_failures.is_empty() {
            failed_directories += 1;
        }
        failures.extend(dir_failures);
    }

    tracing::info!(
        directories = directories_checked,
        failures = failures.len(),
        "inventory walk complete"
    );

    Ok(InventoryReport {
        root: root.to_owned(),
        directories_checked,
        failed_directories,
        ok: failures.is_empty(),
        failures,
    })
}
