//! Root-level inventory check: the project root's direct children must match
//! the bullet list in a single inventory file (`docs/INVENTORY.md`).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use inventory_doc::{LineKind, classify_line, clean_name};

use crate::config::RootInventoryConfig;
use crate::diff::NameDiff;
use crate::directory::read_inventory;
use crate::error::InventoryError;
use crate::report::RootInventoryReport;

/// Names listed as bullets. A bullet carrying a description
/// (`- name: text`) contributes its name only; a bare bullet contributes its
/// whole text. Horizontal rules (`---`) are not bullets.
#[must_use]
pub fn documented_root_names(text: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for line in text.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('-') else {
            continue;
        };
        if rest.chars().all(|c| c == '-') {
            continue;
        }
        let name = match classify_line(trimmed) {
            LineKind::Bullet(entry) => entry.name,
            _ => clean_name(rest),
        };
        if !name.is_empty() {
            names.insert(name);
        }
    }
    names
}

fn actual_root_names(
    root: &Path,
    config: &RootInventoryConfig,
) -> Result<BTreeSet<String>, InventoryError> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(root).map_err(|e| InventoryError::io(root, e))? {
        let entry = entry.map_err(|e| InventoryError::io(root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || config.ignore_names.contains(&name) {
            continue;
        }
        names.insert(name);
    }
    Ok(names)
}

/// Compare the direct children of `root` against its root-level inventory.
///
/// # Errors
///
/// Returns an error if `root` does not exist or is not a directory, if the
/// inventory file is missing, or if either cannot be read.
pub fn check_root_inventory(
    root: &Path,
    config: &RootInventoryConfig,
) -> Result<RootInventoryReport, InventoryError> {
    if !root.exists() {
        return Err(InventoryError::RootNotFound(root.to_owned()));
    }
    if !root.is_dir() {
        return Err(InventoryError::RootNotDirectory(root.to_owned()));
    }

    let inventory = root.join(&config.inventory);
    if !inventory.is_file() {
        return Err(InventoryError::RootInventoryMissing(inventory));
    }

    let documented = documented_root_names(&read_inventory(&inventory, config.max_file_size)?);
    let actual = actual_root_names(root, config)?;
    let diff = NameDiff::between(&actual, &documented);
    tracing::debug!(
        inventory = %inventory.display(),
        missing = diff.missing.len(),
        extra = diff.extra.len(),
        "compared root inventory"
    );

    Ok(RootInventoryReport {
        ok: diff.is_empty(),
        inventory,
        diff,
    })
}
