//! Compiled ignore patterns.

use std::path::Path;

use regex::Regex;

use crate::error::DiscoveryError;

/// A set of regular expressions matched against full entry paths.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// An empty set that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile every pattern, failing on the first invalid one.
    pub fn compile<I, S>(patterns: I) -> Result<Self, DiscoveryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|e| DiscoveryError::InvalidPattern {
                    pattern: p.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Check if any pattern matches the path's string form.
    pub fn is_match(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let path = path.to_string_lossy();
        self.patterns.iter().any(|re| re.is_match(&path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_anywhere_in_path() {
        let ignore = IgnorePatterns::compile([r"\.git", r"\.bak$"]).unwrap();

        assert!(ignore.is_match(Path::new("/src/.git/config")));
        assert!(ignore.is_match(Path::new("/src/old.bak")));
        assert!(!ignore.is_match(Path::new("/src/old.bak.txt")));
        assert!(!ignore.is_match(Path::new("/src/main.rs")));
    }

    #[test]
    fn test_empty_matches_nothing() {
        let ignore = IgnorePatterns::empty();
        assert!(ignore.is_empty());
        assert!(!ignore.is_match(Path::new("/anything")));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = IgnorePatterns::compile(["ok", "(unclosed"]).unwrap_err();
        match err {
            DiscoveryError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
