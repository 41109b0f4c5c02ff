//! Documented-set versus actual-set comparison shared by the completeness
//! rule and the root-inventory check.

use std::collections::BTreeSet;

use serde::Serialize;

/// Difference between the names a document lists and the names on disk.
/// Both lists are sorted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NameDiff {
    /// Present on disk, absent from the document.
    pub missing: Vec<String>,
    /// Listed in the document, absent from disk.
    pub extra: Vec<String>,
}

impl NameDiff {
    /// Compare `actual` names against `documented` names.
    #[must_use]
    pub fn between(actual: &BTreeSet<String>, documented: &BTreeSet<String>) -> Self {
        Self {
            missing: actual.difference(documented).cloned().collect(),
            extra: documented.difference(actual).cloned().collect(),
        }
    }

    /// Whether both sets are equal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn test_between_reports_both_sides_sorted() {
        let diff = NameDiff::between(&set(&["b.py", "a.py", "z"]), &set(&["a.py", "c.py"]));
        assert_eq!(diff.missing, vec!["b.py", "z"]);
        assert_eq!(diff.extra, vec!["c.py"]);
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_between_equal_sets() {
        let diff = NameDiff::between(&set(&["a", "b"]), &set(&["b", "a"]));
        assert!(diff.is_empty());
    }
}
