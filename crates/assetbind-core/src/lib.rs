//! Core types for assetbind.
//!
//! This crate provides the data structures shared by the discovery engine
//! and its consumers: asset records, the ordered catalog, configuration,
//! ignore patterns, and the hierarchical name tree.

mod asset;
mod config;
mod error;
mod ignore;
mod tree;

pub use asset::{Asset, Catalog, DiscoveryStats};
pub use config::{DiscoveryConfig, DiscoveryConfigBuilder, InputSpec};
pub use error::DiscoveryError;
pub use ignore::IgnorePatterns;
pub use tree::AssetTree;
