//! Asset discovery engine for assetbind.
//!
//! This crate walks input files and directories and produces a
//! [`Catalog`] of assets, each with a logical name and a unique identifier
//! ready to be used in generated source code.
//!
//! # Overview
//!
//! - **Deterministic order**: every directory listing is sorted by name
//! - **Unique identifiers** derived from logical names, shared across roots
//! - **Cycle-safe** symlink following via a visited-directory set
//! - **Ignore patterns** as regular expressions over entry paths
//!
//! # Example
//!
//! ```rust,no_run
//! use assetbind_scan::{DiscoveryConfig, InputSpec, discover};
//!
//! let config = DiscoveryConfig::builder()
//!     .input(InputSpec::new("static", true))
//!     .prefix("static")
//!     .ignore(vec![r"\.map$".to_string()])
//!     .build()
//!     .unwrap();
//!
//! let catalog = discover(&config).unwrap();
//! for asset in &catalog {
//!     println!("{} -> {}", asset.name, asset.func);
//! }
//! ```

mod discovery;
mod ident;
mod paths;
mod visited;
mod walker;

pub use discovery::{discover, discover_inputs};
pub use ident::{KnownIdentifiers, base_identifier, is_valid_identifier, sanitize};
pub use paths::{clean, clean_absolute, to_slash};
pub use visited::VisitedPaths;
pub use walker::TreeWalker;

// Re-export core types for convenience
pub use assetbind_core::{
    Asset, AssetTree, Catalog, DiscoveryConfig, DiscoveryError, DiscoveryStats, IgnorePatterns,
    InputSpec,
};
