//! Per-directory inventory validation.
//!
//! A [`DirectorySnapshot`] captures what is actually on disk, the inventory
//! document is parsed with [`inventory_doc::parse_inventory`], and
//! [`check_document`] reconciles the two. Only the presence rule stops
//! further checks; every other rule is always evaluated.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use inventory_doc::{InventoryDocument, parse_inventory, word_count};

use crate::config::{InventoryConfig, RuleConfig, WalkConfig};
use crate::diff::NameDiff;
use crate::error::{FailureKind, InventoryError, ValidationFailure};

/// The actual contents of one directory at validation time.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    /// The directory on disk.
    pub path: PathBuf,
    /// Child names, minus ignored and hidden names.
    pub children: BTreeSet<String>,
    /// The inventory document, if the directory has one.
    pub inventory_file: Option<PathBuf>,
}

impl DirectorySnapshot {
    /// List `path` and locate its inventory file (matched ASCII
    /// case-insensitively against `inventory_file_name`; when several
    /// spellings exist the first in byte order wins).
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Io`] if the directory cannot be listed.
    pub fn capture(
        path: &Path,
        walk: &WalkConfig,
        inventory_file_name: &str,
    ) -> Result<Self, InventoryError> {
        let mut children = BTreeSet::new();
        let mut inventory_files = Vec::new();

        for entry in fs::read_dir(path).map_err(|e| InventoryError::io(path, e))? {
            let entry = entry.map_err(|e| InventoryError::io(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_path = entry.path();

            if name.eq_ignore_ascii_case(inventory_file_name) && child_path.is_file() {
                inventory_files.push(child_path);
            }
            if name.starts_with('.') || walk.is_ignored(&name) {
                continue;
            }
            children.insert(name);
        }

        inventory_files.sort();
        Ok(Self {
            path: path.to_owned(),
            children,
            inventory_file: inventory_files.into_iter().next(),
        })
    }
}

/// Read an inventory file in full, bounded by `max_file_size`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is larger than
/// `max_file_size` or is not valid UTF-8.
pub fn read_inventory(path: &Path, max_file_size: u64) -> Result<String, InventoryError> {
    let file = fs::File::open(path).map_err(|e| InventoryError::io(path, e))?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| InventoryError::io(path, e))?;

    if buffer.len() as u64 > max_file_size {
        return Err(InventoryError::FileTooLarge {
            path: path.to_owned(),
            limit: max_file_size,
        });
    }

    String::from_utf8(buffer).map_err(|_| InventoryError::InvalidEncoding(path.to_owned()))
}

/// Apply the folder-description, completeness, entry-description and
/// uniqueness rules to a parsed document.
///
/// `directory` is only used to label the failures.
#[must_use]
pub fn check_document(
    directory: &Path,
    children: &BTreeSet<String>,
    doc: &InventoryDocument,
    rules: &RuleConfig,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    let folder_words = word_count(&doc.folder_description);
    if folder_words < rules.min_folder_description_words {
        failures.push(ValidationFailure::new(
            directory,
            FailureKind::FolderDescriptionTooShort,
            None,
            format!(
                "folder description has {folder_words} word(s), expected at least {}",
                rules.min_folder_description_words
            ),
        ));
    }

    let documented: BTreeSet<String> = doc.names().map(str::to_owned).collect();
    let diff = NameDiff::between(children, &documented);
    for name in &diff.missing {
        failures.push(ValidationFailure::new(
            directory,
            FailureKind::UndocumentedItem,
            Some(name.as_str()),
            format!("missing entry for '{name}'"),
        ));
    }
    for name in &diff.extra {
        failures.push(ValidationFailure::new(
            directory,
            FailureKind::StaleEntry,
            Some(name.as_str()),
            format!("documented '{name}' but not present"),
        ));
    }

    let mut first_with_description: HashMap<&str, &str> = HashMap::new();
    for entry in doc.entries() {
        let words = word_count(&entry.description);
        if children.contains(&entry.name) && words < rules.min_entry_description_words {
            failures.push(ValidationFailure::new(
                directory,
                FailureKind::EntryDescriptionTooShort,
                Some(entry.name.as_str()),
                format!(
                    "description for '{}' has {words} word(s), expected at least {}",
                    entry.name, rules.min_entry_description_words
                ),
            ));
        }

        if let Some(first) = first_with_description.get(entry.description.as_str()) {
            failures.push(ValidationFailure::new(
                directory,
                FailureKind::DuplicateDescription,
                Some(entry.name.as_str()),
                format!(
                    "description for '{}' duplicates the one for '{first}'",
                    entry.name
                ),
            ));
        } else {
            first_with_description.insert(&entry.description, &entry.name);
        }
    }

    failures
}

/// Validates single directories against their inventory documents.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryValidator<'a> {
    config: &'a InventoryConfig,
}

impl<'a> DirectoryValidator<'a> {
    /// Create a validator applying `config` to every directory.
    #[must_use]
    pub fn new(config: &'a InventoryConfig) -> Self {
        Self { config }
    }

    /// Validate the directory at `path`, labelling failures with `label`
    /// (normally the path relative to the walk root).
    ///
    /// An empty result means the directory passes.
    ///
    /// # Errors
    ///
    /// Returns an [`InventoryError`] if the directory cannot be listed or its
    /// inventory document cannot be read.
    pub fn validate(
        &self,
        path: &Path,
        label: &Path,
    ) -> Result<Vec<ValidationFailure>, InventoryError> {
        let rules = &self.config.rules;
        let snapshot =
            DirectorySnapshot::capture(path, &self.config.walk, &rules.inventory_file_name)?;

        let Some(inventory_file) = &snapshot.inventory_file else {
            return Ok(vec![ValidationFailure::new(
                label,
                FailureKind::MissingInventory,
                None,
                format!("missing {}", rules.inventory_file_name),
            )]);
        };

        let text = read_inventory(inventory_file, rules.max_file_size)?;
        let doc = parse_inventory(&text);
        tracing::debug!(
            inventory = %inventory_file.display(),
            entries = doc.len(),
            "parsed inventory"
        );
        for name in doc.overwritten_names() {
            tracing::warn!(
                inventory = %inventory_file.display(),
                name = %name,
                "entry documented more than once; the later description wins"
            );
        }

        Ok(check_document(label, &snapshot.children, &doc, rules))
    }
}
