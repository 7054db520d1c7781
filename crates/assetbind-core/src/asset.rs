//! Asset records and the ordered catalog they are collected into.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One discovered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Absolute, OS-native path of the source file.
    pub path: PathBuf,

    /// Logical, forward-slash separated name. Never starts with `/`.
    pub name: CompactString,

    /// Identifier derived from `name`, unique within its catalog.
    pub func: CompactString,
}

impl Asset {
    /// Create a new asset record.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<CompactString>,
        func: impl Into<CompactString>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            func: func.into(),
        }
    }

    /// Last component of the logical name.
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(self.name.as_str())
    }
}

/// Counters collected while walking.
///
/// These only depend on the filesystem contents, so two runs over the same
/// tree produce equal stats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryStats {
    /// Regular files turned into assets.
    pub files: u64,
    /// Directories listed (roots included).
    pub dirs_entered: u64,
    /// Symbolic links followed.
    pub symlinks_followed: u64,
    /// Entries dropped by an ignore pattern.
    pub ignored: u64,
    /// Symbolic links skipped because their target was already visited.
    pub cycles_skipped: u64,
    /// Symbolic links whose target does not exist.
    pub broken_symlinks: u64,
    /// Subdirectories skipped because recursion was disabled.
    pub dirs_skipped: u64,
}

impl DiscoveryStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ordered, append-only collection of discovered assets.
///
/// Iteration order is discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    assets: Vec<Asset>,

    /// Walk counters for the run that produced this catalog.
    pub stats: DiscoveryStats,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an asset.
    pub fn push(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if no assets were discovered.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over assets in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.assets.iter()
    }

    /// Borrow the assets as a slice.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Logical names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.name.as_str())
    }

    /// Find the first asset with the given logical name.
    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    /// Find an asset by its identifier.
    pub fn by_func(&self, func: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.func == func)
    }
}

impl IntoIterator for Catalog {
    type Item = Asset;
    type IntoIter = std::vec::IntoIter<Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Asset;
    type IntoIter = std::slice::Iter<'a, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keeps_push_order() {
        let mut catalog = Catalog::new();
        catalog.push(Asset::new("/x/b.txt", "b.txt", "bTxt"));
        catalog.push(Asset::new("/x/a.txt", "a.txt", "aTxt"));

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_lookup() {
        let mut catalog = Catalog::new();
        catalog.push(Asset::new("/x/a/x.txt", "a/x.txt", "aXTxt"));

        assert_eq!(catalog.get("a/x.txt").map(|a| a.func.as_str()), Some("aXTxt"));
        assert!(catalog.by_func("aXTxt").is_some());
        assert!(catalog.get("x.txt").is_none());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(Asset::new("/p", "icons/x.png", "f").base_name(), "x.png");
        assert_eq!(Asset::new("/p", "x.png", "f").base_name(), "x.png");
    }
}
