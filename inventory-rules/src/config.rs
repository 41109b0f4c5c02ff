//! Configuration types for inventory validation.
//!
//! Split into walk config (which directories are visited and which children
//! count) and rule config (what a valid inventory looks like). Neither is
//! process-global: both are passed into the walker and validator.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Names skipped both when walking and when listing a directory's children.
pub const DEFAULT_IGNORE_NAMES: &[&str] =
    &[".git", "node_modules", "dist", "build", "__pycache__"];

/// Names left out of the root-level inventory comparison.
pub const ROOT_IGNORE_NAMES: &[&str] =
    &[".git", "node_modules", "dist", "build", ".github", "docs"];

/// Location of the root-level inventory list, relative to the project root.
pub const DEFAULT_ROOT_INVENTORY: &str = "docs/INVENTORY.md";

/// Name of the per-directory inventory document (matched case-insensitively).
pub const DEFAULT_INVENTORY_FILE_NAME: &str = "inventory.md";

/// Tree-walk and directory-listing options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct WalkConfig {
    /// Child names that are never walked into and never need documenting.
    pub ignore_names: BTreeSet<String>,
    /// Extra glob patterns (matched against the path relative to the root, or
    /// the bare directory name) whose directories are not walked. Unlike
    /// `ignore_names`, excluded directories must still be documented by their
    /// parent.
    pub exclude: Vec<String>,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: unbounded). A directory
    /// below this depth aborts the walk instead of being skipped.
    pub max_depth: usize,
}

impl WalkConfig {
    /// Whether a child with this name is left out of walks and snapshots.
    /// Hidden names (leading `.`) are always left out of snapshots.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_names.contains(name)
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            ignore_names: DEFAULT_IGNORE_NAMES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            exclude: Vec::new(),
            follow_links: false,
            max_depth: usize::MAX,
        }
    }
}

/// Inventory quality thresholds.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RuleConfig {
    /// File name of the inventory document (default: `inventory.md`).
    pub inventory_file_name: String,
    /// Minimum words in the folder description (default: 10).
    pub min_folder_description_words: usize,
    /// Minimum words in each entry description (default: 4).
    pub min_entry_description_words: usize,
    /// Maximum inventory file size in bytes (default: 1 MB).
    pub max_file_size: u64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            inventory_file_name: DEFAULT_INVENTORY_FILE_NAME.to_owned(),
            min_folder_description_words: 10,
            min_entry_description_words: 4,
            max_file_size: 1_048_576,
        }
    }
}

/// Full configuration for one validation run.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct InventoryConfig {
    pub walk: WalkConfig,
    pub rules: RuleConfig,
}

/// Options for the root-level inventory comparison.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RootInventoryConfig {
    /// Inventory list path; relative paths are resolved against the root.
    pub inventory: PathBuf,
    /// Root children that never need listing. Hidden names are always skipped.
    pub ignore_names: BTreeSet<String>,
    /// Maximum inventory file size in bytes (default: 1 MB).
    pub max_file_size: u64,
}

impl Default for RootInventoryConfig {
    fn default() -> Self {
        Self {
            inventory: PathBuf::from(DEFAULT_ROOT_INVENTORY),
            ignore_names: ROOT_IGNORE_NAMES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            max_file_size: RuleConfig::default().max_file_size,
        }
    }
}
