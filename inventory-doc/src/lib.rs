//! Parsing primitives for per-directory `inventory.md` documents.
//!
//! An inventory document is loosely formatted Markdown: a title header, a
//! one-line description of the folder, and one entry per child of the
//! folder. Entries are written either as bullets or as table rows:
//!
//! ```text
//! # core
//!
//! Shared primitives used by every other module of the exporter tool.
//!
//! - `dom.js`: Helpers for querying and waiting on DOM nodes.
//! | `config.js` | Runtime configuration defaults and overrides. |
//! ```
//!
//! Parsing never fails: lines that match neither entry syntax are prose and
//! are skipped. Completeness and quality are judged by the caller.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Lines whose trimmed text starts with this marker are Markdown headers.
pub const HEADER_MARKER: char = '#';

/// `- name: description` (name may be wrapped in `*`, `**` or backticks).
static BULLET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^-\s+([^:\s]+)\s*:\s*(.+)$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid bullet regex: {err}"),
    }
});

/// `| `name` | description |` anywhere on the line.
static TABLE_ROW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"\|\s*`([^`]+)`\s*\|\s*([^|]+)\|") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid table row regex: {err}"),
    }
});

/// One documented child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Child name with markers and any trailing `/` stripped.
    pub name: String,
    /// Free-text description, trimmed, with leading emphasis markers left
    /// over from `**name:**` removed.
    pub description: String,
}

impl Entry {
    fn new(raw_name: &str, description: &str) -> Self {
        Self {
            name: clean_name(raw_name),
            description: description
                .trim()
                .trim_start_matches('*')
                .trim_start()
                .to_owned(),
        }
    }
}

/// Classification of a single inventory line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `- name: description`
    Bullet(Entry),
    /// `| `name` | description |`
    TableRow(Entry),
    /// Prose, headers, blank lines and anything else.
    Other,
}

impl LineKind {
    /// The entry carried by this line, if any.
    #[must_use]
    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Bullet(entry) | Self::TableRow(entry) => Some(entry),
            Self::Other => None,
        }
    }
}

/// Parsed content of one inventory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDocument {
    /// First non-blank, non-header line after the title header.
    pub folder_description: String,
    entries: Vec<Entry>,
    overwritten_names: Vec<String>,
}

impl InventoryDocument {
    /// Entries in order of first appearance. A repeated name keeps its first
    /// position and its last description.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Description documented for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.description.as_str())
    }

    /// Documented names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Names that were documented more than once (each reported once).
    ///
    /// The later description always wins; this list only exists so callers
    /// can warn about the collision.
    #[must_use]
    pub fn overwritten_names(&self) -> &[String] {
        &self.overwritten_names
    }

    /// Number of distinct documented names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: Entry, positions: &mut HashMap<String, usize>) {
        if let Some(&pos) = positions.get(&entry.name) {
            if !self.overwritten_names.contains(&entry.name) {
                self.overwritten_names.push(entry.name.clone());
            }
            self.entries[pos].description = entry.description;
            return;
        }
        positions.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

/// Strip emphasis, code markers and a trailing `/` from an entry name.
#[must_use]
pub fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_matches('*')
        .trim_matches('`')
        .trim_matches('*')
        .trim_end_matches('/')
        .trim()
        .to_owned()
}

fn match_bullet(line: &str) -> Option<Entry> {
    let caps = BULLET_PATTERN.captures(line.trim())?;
    let entry = Entry::new(caps.get(1)?.as_str(), caps.get(2)?.as_str());
    (!entry.name.is_empty()).then_some(entry)
}

fn match_table_row(line: &str) -> Option<Entry> {
    let caps = TABLE_ROW_PATTERN.captures(line)?;
    let entry = Entry::new(caps.get(1)?.as_str(), caps.get(2)?.as_str());
    (!entry.name.is_empty()).then_some(entry)
}

/// Classify one line. Bullet syntax is tried before table-row syntax.
#[must_use]
pub fn classify_line(line: &str) -> LineKind {
    if let Some(entry) = match_bullet(line) {
        return LineKind::Bullet(entry);
    }
    if let Some(entry) = match_table_row(line) {
        return LineKind::TableRow(entry);
    }
    LineKind::Other
}

fn is_header(line: &str) -> bool {
    line.trim_start().starts_with(HEADER_MARKER)
}

/// Extract the folder description: the first non-blank line that follows the
/// first header and is not itself a header. Empty when there is none.
#[must_use]
pub fn folder_description(text: &str) -> String {
    let mut seen_header = false;
    for line in text.lines() {
        if is_header(line) {
            seen_header = true;
            continue;
        }
        if seen_header && !line.trim().is_empty() {
            return line.trim().to_owned();
        }
    }
    String::new()
}

/// Parse the raw text of an inventory document.
#[must_use]
pub fn parse_inventory(text: &str) -> InventoryDocument {
    let mut doc = InventoryDocument {
        folder_description: folder_description(text),
        ..InventoryDocument::default()
    };
    let mut positions = HashMap::new();

    for line in text.lines() {
        if let Some(entry) = classify_line(line).into_entry() {
            doc.insert(entry, &mut positions);
        }
    }

    doc
}

/// Number of whitespace-delimited words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn entry(name: &str, description: &str) -> Entry {
        Entry {
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }

    // ---- classify_line ----

    #[test]
    fn test_bullet_plain_name() {
        assert_eq!(
            classify_line("- main.rs: Entry point for the binary"),
            LineKind::Bullet(entry("main.rs", "Entry point for the binary"))
        );
    }

    #[test]
    fn test_bullet_code_and_emphasis_names() {
        assert_eq!(
            classify_line("- `lib.rs`: Library root module"),
            LineKind::Bullet(entry("lib.rs", "Library root module"))
        );
        assert_eq!(
            classify_line("- **docs/**: Project documentation tree"),
            LineKind::Bullet(entry("docs", "Project documentation tree"))
        );
        assert_eq!(
            classify_line("  - __init__.py : Package marker file"),
            LineKind::Bullet(entry("__init__.py", "Package marker file"))
        );
    }

    #[test]
    fn test_bullet_bold_name_with_colon_inside() {
        let kind = classify_line("- **dom.js:** Helpers for DOM queries");
        assert_eq!(
            kind,
            LineKind::Bullet(entry("dom.js", "Helpers for DOM queries"))
        );
    }

    #[test]
    fn test_bullet_description_keeps_later_colons() {
        let kind = classify_line("- build.js: Bundles sources: see README");
        assert_eq!(
            kind,
            LineKind::Bullet(entry("build.js", "Bundles sources: see README"))
        );
    }

    #[test]
    fn test_bullet_without_description_is_other() {
        assert_eq!(classify_line("- main.rs:"), LineKind::Other);
        assert_eq!(classify_line("- main.rs"), LineKind::Other);
        assert_eq!(classify_line("-main.rs: no space after dash"), LineKind::Other);
    }

    #[test]
    fn test_table_row() {
        assert_eq!(
            classify_line("| `save/` | Persists exported conversations | stable |"),
            LineKind::TableRow(entry("save", "Persists exported conversations"))
        );
    }

    #[test]
    fn test_table_header_and_separator_are_other() {
        assert_eq!(classify_line("| Name | Description |"), LineKind::Other);
        assert_eq!(classify_line("|------|-------------|"), LineKind::Other);
    }

    #[test]
    fn test_prose_and_headers_are_other() {
        assert_eq!(classify_line("# Inventory"), LineKind::Other);
        assert_eq!(classify_line(""), LineKind::Other);
        assert_eq!(classify_line("Just some words here."), LineKind::Other);
    }

    // ---- folder_description ----

    #[test]
    fn test_folder_description_after_title() {
        let text = "# core\n\n  Shared helpers for the whole tool.  \n\n- a.js: x\n";
        assert_eq!(folder_description(text), "Shared helpers for the whole tool.");
    }

    #[test]
    fn test_folder_description_skips_subheaders() {
        let text = "# core\n## Overview\n\nThe real description line.\n";
        assert_eq!(folder_description(text), "The real description line.");
    }

    #[test]
    fn test_folder_description_requires_header() {
        assert_eq!(folder_description("No header here.\n"), "");
        assert_eq!(folder_description("# Only a title\n\n"), "");
    }

    // ---- parse_inventory ----

    #[test]
    fn test_parse_mixed_syntaxes() {
        let text = "\
# scripts

Helper scripts used by the continuous integration pipeline jobs.

- build.sh: Builds the release artefacts
| `test.sh` | Runs the whole test suite |
Some trailing prose.
";
        let doc = parse_inventory(text);
        assert_eq!(
            doc.folder_description,
            "Helper scripts used by the continuous integration pipeline jobs."
        );
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("build.sh"), Some("Builds the release artefacts"));
        assert_eq!(doc.get("test.sh"), Some("Runs the whole test suite"));
        assert!(doc.overwritten_names().is_empty());
    }

    #[test]
    fn test_parse_repeated_name_last_write_wins() {
        let text = "# t\n\n- a.py: first description here\n- b.py: other\n- a.py: second description here\n";
        let doc = parse_inventory(text);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("a.py"), Some("second description here"));
        let names: Vec<&str> = doc.names().collect();
        assert_eq!(names, vec!["a.py", "b.py"]);
        assert_eq!(doc.overwritten_names(), ["a.py".to_owned()]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "# t\n\nDescription.\n- a: one two three four\n| `b` | five six seven eight |\n";
        assert_eq!(parse_inventory(text), parse_inventory(text));
    }

    #[test]
    fn test_parse_empty_text() {
        let doc = parse_inventory("");
        assert!(doc.is_empty());
        assert_eq!(doc.folder_description, "");
    }

    // ---- helpers ----

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("**`src/`**"), "src");
        assert_eq!(clean_name("*notes.md*"), "notes.md");
        assert_eq!(clean_name("plain"), "plain");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("Utilities."), 1);
        assert_eq!(word_count("  handles   foo\tbar \n"), 3);
    }
}
