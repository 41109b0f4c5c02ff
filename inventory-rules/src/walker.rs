//! Directory discovery for the validation pipeline.
//!
//! Properties enforced here:
//! - Ignored names prune whole subtrees (the root itself is always visited)
//! - Symlinks are not followed by default (`follow_links: false`)
//! - A directory beyond the maximum depth is an error, never a silent skip
//! - Siblings are visited in file-name order so reports are reproducible

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::WalkConfig;
use crate::error::InventoryError;

/// Lazy, restartable enumeration of the directories under a root.
#[derive(Debug)]
pub struct TreeWalker<'a> {
    root: PathBuf,
    config: &'a WalkConfig,
    exclude: Vec<Pattern>,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker over `root`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidExcludePattern`] if an exclude glob
    /// cannot be parsed.
    pub fn new(root: impl Into<PathBuf>, config: &'a WalkConfig) -> Result<Self, InventoryError> {
        let exclude = config
            .exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| InventoryError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: root.into(),
            config,
            exclude,
        })
    }

    /// The walk root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh scan. Yields every non-ignored directory, root first.
    ///
    /// A directory deeper than `max_depth` yields
    /// [`InventoryError::DepthLimitExceeded`].
    pub fn directories(&self) -> impl Iterator<Item = Result<PathBuf, InventoryError>> + '_ {
        let limit = self.config.max_depth;
        // One level past the limit so over-deep directories surface.
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_links)
            .max_depth(limit.saturating_add(1))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_visit(entry))
            .filter_map(move |result| match result {
                Ok(entry) if entry.file_type().is_dir() => {
                    if entry.depth() > limit {
                        Some(Err(InventoryError::DepthLimitExceeded {
                            path: entry.into_path(),
                            limit,
                        }))
                    } else {
                        Some(Ok(entry.into_path()))
                    }
                }
                Ok(_) => None,
                Err(err) => Some(Err(InventoryError::from(err))),
            })
    }

    /// `true` if the entry should be kept (for `WalkDir::filter_entry`).
    fn should_visit(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if self.config.is_ignored(&name) {
            tracing::trace!(path = %entry.path().display(), "skipping ignored directory");
            return false;
        }

        if self.is_excluded(entry.path()) {
            tracing::debug!(path = %entry.path().display(), "skipping excluded directory");
            return false;
        }

        true
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative_str = relative.to_string_lossy();
        self.exclude.iter().any(|pattern| {
            pattern.matches(&relative_str)
                || path
                    .file_name()
                    .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for dir in [
            "b/inner",
            "a",
            "node_modules/pkg",
            "build",
            "src/build/deep",
            ".github/workflows",
        ] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        fs::write(tmp.path().join("a/file.txt"), "x").unwrap();
        tmp
    }

    fn relative(walker: &TreeWalker<'_>) -> Vec<String> {
        walker
            .directories()
            .map(|path| {
                let path = path.unwrap();
                path.strip_prefix(walker.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_walk_prunes_ignored_and_sorts() {
        let tmp = tree();
        let config = WalkConfig::default();
        let walker = TreeWalker::new(tmp.path(), &config).unwrap();

        assert_eq!(
            relative(&walker),
            vec!["", ".github", ".github/workflows", "a", "b", "b/inner", "src"]
        );
    }

    #[test]
    fn test_walk_is_restartable_and_deterministic() {
        let tmp = tree();
        let config = WalkConfig::default();
        let walker = TreeWalker::new(tmp.path(), &config).unwrap();
        assert_eq!(relative(&walker), relative(&walker));
    }

    #[test]
    fn test_walk_root_named_like_ignored_dir_is_visited() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("build");
        fs::create_dir_all(root.join("child")).unwrap();
        let config = WalkConfig::default();
        let walker = TreeWalker::new(&root, &config).unwrap();
        assert_eq!(relative(&walker), vec!["", "child"]);
    }

    #[test]
    fn test_walk_exclude_pattern() {
        let tmp = tree();
        let mut config = WalkConfig::default();
        config.exclude = vec!["b".to_owned(), ".github".to_owned()];
        let walker = TreeWalker::new(tmp.path(), &config).unwrap();
        assert_eq!(relative(&walker), vec!["", "a", "src"]);
    }

    #[test]
    fn test_walk_reaches_deep_trees_by_default() {
        let tmp = TempDir::new().unwrap();
        let chain = vec!["d"; 70].join("/");
        fs::create_dir_all(tmp.path().join(&chain)).unwrap();

        let config = WalkConfig::default();
        let walker = TreeWalker::new(tmp.path(), &config).unwrap();
        let dirs: Vec<PathBuf> = walker.directories().map(Result::unwrap).collect();
        assert_eq!(dirs.len(), 71);
        assert_eq!(dirs.last().unwrap(), &tmp.path().join(&chain));
    }

    #[test]
    fn test_walk_below_max_depth_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        fs::create_dir_all(tmp.path().join("x/y")).unwrap();

        let mut config = WalkConfig::default();
        config.max_depth = 2;
        let walker = TreeWalker::new(tmp.path(), &config).unwrap();
        let results: Vec<_> = walker.directories().collect();

        assert_eq!(results.len(), 6);
        let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 1);
        assert!(
            matches!(
                errors[0],
                InventoryError::DepthLimitExceeded { path, limit: 2 } if path.ends_with("a/b/c")
            ),
            "got: {}",
            errors[0]
        );
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let mut config = WalkConfig::default();
        config.exclude = vec!["[".to_owned()];
        let err = TreeWalker::new("/tmp", &config).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidExcludePattern { .. }));
    }
}
