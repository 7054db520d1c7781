//! Lexical path helpers shared by naming and identity checks.

use std::io;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Drop `.` components and fold `name/..` pairs without touching the
/// filesystem.
///
/// Leading `..` components of a relative path are kept, `..` directly under
/// the root is dropped, and a path that cleans to nothing becomes `.`.
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.into_iter().collect()
}

/// Make a path absolute against the working directory and [`clean`] it.
/// Symlinks are not resolved.
pub fn clean_absolute(path: &Path) -> io::Result<PathBuf> {
    Ok(clean(&std::path::absolute(path)?))
}

/// String form of a path with the platform separator replaced by `/`.
pub fn to_slash(path: &Path) -> String {
    let s = path.to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(MAIN_SEPARATOR, "/")
    }
}
