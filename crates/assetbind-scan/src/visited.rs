//! Directory tracking for symlink cycle prevention.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Canonical directory paths already entered during one discovery run.
///
/// A followed symlink whose resolved target is in this set is skipped, which
/// is what keeps a link back to an ancestor from recursing forever.
#[derive(Debug, Default)]
pub struct VisitedPaths {
    seen: HashSet<PathBuf>,
}

impl VisitedPaths {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Mark a path as visited. Returns `true` if it was not seen before.
    pub fn mark(&mut self, path: impl Into<PathBuf>) -> bool {
        self.seen.insert(path.into())
    }

    /// Check if a path has been visited (without marking it).
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Number of distinct paths visited.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if nothing has been visited.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
