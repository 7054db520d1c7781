//! Discovery driver: walks every configured input into one catalog.

use std::time::Instant;

use tracing::{debug, info};

use assetbind_core::{Catalog, DiscoveryConfig, DiscoveryError, IgnorePatterns, InputSpec};

use crate::ident::KnownIdentifiers;
use crate::visited::VisitedPaths;
use crate::walker::TreeWalker;

/// Run discovery for a validated configuration.
pub fn discover(config: &DiscoveryConfig) -> Result<Catalog, DiscoveryError> {
    let ignore = config.ignore_patterns()?;
    discover_inputs(&config.inputs, &config.prefix, &ignore)
}

/// Walk `inputs` in order, sharing identifier and visited-directory state
/// across all of them.
///
/// The first error aborts the run and no catalog is returned.
pub fn discover_inputs(
    inputs: &[InputSpec],
    prefix: &str,
    ignore: &IgnorePatterns,
) -> Result<Catalog, DiscoveryError> {
    let start = Instant::now();

    let mut known = KnownIdentifiers::new();
    let mut visited = VisitedPaths::new();
    let mut catalog = Catalog::new();

    let mut walker = TreeWalker::new(prefix, ignore, &mut known, &mut visited, &mut catalog)?;
    for input in inputs {
        debug!(
            path = %input.path.display(),
            recursive = input.recursive,
            "walking input"
        );
        walker.walk(&input.path, input.recursive)?;
    }

    info!(
        assets = catalog.len(),
        dirs = catalog.stats.dirs_entered,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "discovery finished"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identifiers_shared_across_inputs() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("x.txt"), "1").unwrap();

        // The same file reached through two inputs keeps its name but not
        // its identifier.
        let inputs = vec![
            InputSpec::new(&dir, false),
            InputSpec::new(dir.join("x.txt"), false),
        ];
        let prefix = dir.to_string_lossy().to_string();
        let catalog = discover_inputs(&inputs, &prefix, &IgnorePatterns::empty()).unwrap();

        let names: Vec<_> = catalog.names().collect();
        let funcs: Vec<_> = catalog.iter().map(|a| a.func.as_str()).collect();
        assert_eq!(names, vec!["x.txt", "x.txt"]);
        assert_eq!(funcs, vec!["xTxt", "xTxt2"]);
    }

    #[test]
    fn test_fails_fast() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ok.txt"), "").unwrap();

        let config = DiscoveryConfig::builder()
            .input(InputSpec::new(temp.path(), false))
            .input(InputSpec::new(temp.path().join("missing"), false))
            .build()
            .unwrap();

        let err = discover(&config).unwrap_err();
        assert!(matches!(err, DiscoveryError::NotFound { .. }));
    }

    #[test]
    fn test_empty_inputs_give_empty_catalog() {
        let catalog = discover_inputs(&[], "", &IgnorePatterns::empty()).unwrap();
        assert!(catalog.is_empty());
    }
}
