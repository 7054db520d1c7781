//! Discovery configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;
use crate::ignore::IgnorePatterns;

/// Suffix marking an input path as recursive on the command line.
const RECURSIVE_SUFFIX: &str = "/...";

/// One input root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    /// File or directory to read assets from.
    pub path: PathBuf,

    /// Descend into subdirectories.
    #[serde(default)]
    pub recursive: bool,
}

impl InputSpec {
    /// Create a new input.
    pub fn new(path: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            path: path.into(),
            recursive,
        }
    }

    /// Parse a command line input, where a trailing `/...` means recursive.
    ///
    /// A bare `...` stands for the current directory.
    pub fn parse(arg: &str) -> Self {
        if arg == "..." {
            return Self::new(".", true);
        }
        match arg.strip_suffix(RECURSIVE_SUFFIX) {
            Some("") => Self::new("/", true),
            Some(path) => Self::new(path, true),
            None => Self::new(arg, false),
        }
    }
}

/// Configuration for one discovery run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DiscoveryConfig {
    /// Input roots, walked in order.
    pub inputs: Vec<InputSpec>,

    /// Leading path stripped from logical names.
    #[builder(default)]
    #[serde(default)]
    pub prefix: String,

    /// Regular expressions; any entry whose path matches is skipped.
    #[builder(default)]
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl DiscoveryConfigBuilder {
    /// Add a single input.
    pub fn input(&mut self, input: InputSpec) -> &mut Self {
        self.inputs.get_or_insert_with(Vec::new).push(input);
        self
    }

    fn validate(&self) -> Result<(), String> {
        let inputs = self.inputs.as_deref().unwrap_or_default();
        let ignore = self.ignore.as_deref().unwrap_or_default();
        check(inputs, ignore).map_err(|e| e.to_string())
    }
}

impl DiscoveryConfig {
    /// Create a new config builder.
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder::default()
    }

    /// Create a config for a single input with no prefix or ignores.
    pub fn new(path: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            inputs: vec![InputSpec::new(path, recursive)],
            prefix: String::new(),
            ignore: Vec::new(),
        }
    }

    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, DiscoveryError> {
        let text = std::fs::read_to_string(path).map_err(|e| DiscoveryError::io(path, e))?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| DiscoveryError::InvalidConfig {
                message: format!("{}: {e}", path.display()),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the builder enforces.
    ///
    /// Configs deserialized directly skip the builder, so callers run this.
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        check(&self.inputs, &self.ignore)
    }

    /// Compile the ignore patterns.
    pub fn ignore_patterns(&self) -> Result<IgnorePatterns, DiscoveryError> {
        IgnorePatterns::compile(&self.ignore)
    }
}

fn check(inputs: &[InputSpec], ignore: &[String]) -> Result<(), DiscoveryError> {
    if inputs.is_empty() {
        return Err(DiscoveryError::InvalidConfig {
            message: "at least one input is required".to_string(),
        });
    }
    if inputs.iter().any(|i| i.path.as_os_str().is_empty()) {
        return Err(DiscoveryError::InvalidConfig {
            message: "input path cannot be empty".to_string(),
        });
    }
    IgnorePatterns::compile(ignore)?;
    Ok(())
}
