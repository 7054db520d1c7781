//! Depth-first directory walker producing ordered asset records.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use assetbind_core::{Asset, Catalog, DiscoveryError, IgnorePatterns};

use crate::ident::{KnownIdentifiers, sanitize};
use crate::paths::{clean, clean_absolute, to_slash};
use crate::visited::VisitedPaths;

/// Walks input roots and appends every file it finds to a shared catalog.
///
/// One walker is used for a whole discovery run, so identifiers and visited
/// directories stay consistent across roots.
pub struct TreeWalker<'a> {
    /// Normalized absolute prefix in slash form, empty when unset.
    prefix: String,
    ignore: &'a IgnorePatterns,
    known: &'a mut KnownIdentifiers,
    visited: &'a mut VisitedPaths,
    catalog: &'a mut Catalog,
}

/// Temporary struct for one directory listing entry.
struct EntryInfo {
    name: OsString,
    kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    Symlink,
    File,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker borrowing the run's shared state.
    pub fn new(
        prefix: &str,
        ignore: &'a IgnorePatterns,
        known: &'a mut KnownIdentifiers,
        visited: &'a mut VisitedPaths,
        catalog: &'a mut Catalog,
    ) -> Result<Self, DiscoveryError> {
        let prefix = if prefix.is_empty() {
            String::new()
        } else {
            let abs = clean_absolute(Path::new(prefix)).map_err(|e| DiscoveryError::io(prefix, e))?;
            to_slash(&abs)
        };

        Ok(Self {
            prefix,
            ignore,
            known,
            visited,
            catalog,
        })
    }

    /// The prefix stripped from candidate names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Walk one root, appending its assets in sorted order.
    ///
    /// A file root yields a single asset. Subdirectories are entered only
    /// when `recursive` is set; symlinks are followed unless their target
    /// was already visited.
    pub fn walk(&mut self, root: &Path, recursive: bool) -> Result<(), DiscoveryError> {
        // Entry paths are absolute only when a prefix has to be matched.
        let dir_path = if self.prefix.is_empty() {
            clean(root)
        } else {
            clean_absolute(root).map_err(|e| DiscoveryError::io(root, e))?
        };

        let metadata = fs::metadata(&dir_path).map_err(|e| DiscoveryError::io(&dir_path, e))?;

        let (dir_path, name_root, entries) = if metadata.is_dir() {
            let canonical = fs::canonicalize(&dir_path).map_err(|e| DiscoveryError::io(&dir_path, e))?;
            self.visited.mark(canonical);
            self.catalog.stats.dirs_entered += 1;

            let entries = list_sorted(&dir_path)?;
            (dir_path, root.to_path_buf(), entries)
        } else {
            let name = dir_path
                .file_name()
                .map(|n| n.to_os_string())
                .ok_or_else(|| DiscoveryError::InvalidFile {
                    path: dir_path.clone(),
                })?;
            let parent = parent_of(&dir_path);
            let name_root = parent_of(root);
            (
                parent,
                name_root,
                vec![EntryInfo {
                    name,
                    kind: EntryKind::File,
                }],
            )
        };

        for entry in entries {
            let path = clean(&dir_path.join(&entry.name));

            if self.ignore.is_match(&path) {
                debug!(path = %path.display(), "ignored");
                self.catalog.stats.ignored += 1;
                continue;
            }

            match entry.kind {
                EntryKind::Dir => {
                    if !recursive {
                        trace!(path = %path.display(), "skipping directory, recursion disabled");
                        self.catalog.stats.dirs_skipped += 1;
                        continue;
                    }
                    self.walk(&clean(&root.join(&entry.name)), recursive)?;
                }
                EntryKind::Symlink => self.follow_symlink(&dir_path, &path, recursive)?,
                EntryKind::File => self.add_file(&path, &name_root, &entry.name)?,
            }
        }

        Ok(())
    }

    fn follow_symlink(
        &mut self,
        dir_path: &Path,
        path: &Path,
        recursive: bool,
    ) -> Result<(), DiscoveryError> {
        let target = fs::read_link(path).map_err(|e| DiscoveryError::io(path, e))?;
        let resolved = if target.is_absolute() {
            target
        } else {
            dir_path.join(target)
        };

        let canonical = match fs::canonicalize(&resolved) {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    target = %resolved.display(),
                    "skipping broken symlink"
                );
                self.catalog.stats.broken_symlinks += 1;
                return Ok(());
            }
            Err(e) => return Err(DiscoveryError::io(&resolved, e)),
        };

        if !self.visited.mark(canonical) {
            debug!(path = %path.display(), "symlink target already visited");
            self.catalog.stats.cycles_skipped += 1;
            return Ok(());
        }

        self.catalog.stats.symlinks_followed += 1;
        self.walk(path, recursive)
    }

    fn add_file(
        &mut self,
        path: &Path,
        name_root: &Path,
        file_name: &OsString,
    ) -> Result<(), DiscoveryError> {
        let candidate = to_slash(path);
        let name = match candidate.strip_prefix(self.prefix.as_str()) {
            Some(stripped) => stripped.to_string(),
            None => to_slash(&clean(&name_root.join(file_name))),
        };
        let name = name.strip_prefix('/').unwrap_or(&name);

        if name.is_empty() {
            return Err(DiscoveryError::InvalidFile {
                path: path.to_path_buf(),
            });
        }

        let func = sanitize(name, self.known);
        let path = clean_absolute(path).map_err(|e| DiscoveryError::io(path, e))?;

        trace!(asset = name, func = %func, "discovered");
        self.catalog.stats.files += 1;
        self.catalog.push(Asset::new(path, name, func));
        Ok(())
    }
}

/// List a directory, sorted by entry name.
///
/// The handle is closed before this returns, so recursion never holds more
/// than one open directory.
fn list_sorted(dir: &Path) -> Result<Vec<EntryInfo>, DiscoveryError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| DiscoveryError::io(entry.path(), e))?;
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        entries.push(EntryInfo {
            name: entry.file_name(),
            kind,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
