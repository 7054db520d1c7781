//! Hierarchical view of a catalog, keyed by the components of logical names.

use std::collections::BTreeMap;
use std::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::asset::Catalog;

/// A node in the name hierarchy.
///
/// Leaves carry the identifier of the asset they stand for. A name that is
/// both a file and a directory prefix of another name (`a` and `a/b`) keeps
/// its identifier and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetTree {
    /// Identifier of the asset at this exact name, if any.
    pub func: Option<CompactString>,
    /// Children keyed by name component, sorted.
    pub children: BTreeMap<CompactString, AssetTree>,
}

impl AssetTree {
    /// Build a tree from every name in the catalog.
    ///
    /// For duplicate names the first asset wins.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut root = Self::default();
        for asset in catalog {
            let mut node = &mut root;
            for part in asset.name.split('/').filter(|p| !p.is_empty()) {
                node = node.children.entry(part.into()).or_default();
            }
            node.func.get_or_insert_with(|| asset.func.clone());
        }
        root
    }

    /// Look up a node by slash-separated path.
    pub fn find(&self, path: &str) -> Option<&AssetTree> {
        path.split('/')
            .filter(|p| !p.is_empty())
            .try_fold(self, |node, part| node.children.get(part))
    }

    /// Number of leaves carrying an asset.
    pub fn asset_count(&self) -> usize {
        usize::from(self.func.is_some())
            + self.children.values().map(AssetTree::asset_count).sum::<usize>()
    }

    /// Render the tree with box-drawing connectors.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn render_children(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let last = self.children.len().saturating_sub(1);
        for (i, (name, child)) in self.children.iter().enumerate() {
            let (branch, next) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            match &child.func {
                Some(func) => writeln!(f, "{indent}{branch}{name} ({func})")?,
                None => writeln!(f, "{indent}{branch}{name}/")?,
            }
            child.render_children(f, &format!("{indent}{next}"))?;
        }
        Ok(())
    }
}

impl fmt::Display for AssetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_children(f, "")
    }
}
