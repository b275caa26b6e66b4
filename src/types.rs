/*!
 * Core types and data structures for structgen
 */

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Index of a node inside its owning [`crate::tree::Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of entry a node materializes as.
///
/// The string forms are the keys used by the source JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// Directory containing other entries
    Directory,
    /// Empty file
    File,
}

/// One directory or file entry of the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// File or directory name on disk
    pub name: String,
    /// Label in the table of contents; `None` keeps the node out of it
    pub toc_name: Option<String>,
    /// Directory or file
    pub kind: NodeKind,
    /// Children in source order. Files may have children too.
    pub children: Vec<NodeId>,
    /// Non-owning link to the parent, `None` for the root
    pub parent: Option<NodeId>,
}

impl Node {
    /// Create a detached node without children
    pub fn new(name: impl Into<String>, toc_name: Option<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            toc_name,
            kind,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Whether the node shows up in the table of contents
    pub fn is_listed(&self) -> bool {
        self.toc_name.is_some()
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Ordered structural export of a node and its subtree.
///
/// Field order is the serialization order: `name`, `toc_name`, `type`, `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDict {
    pub name: String,
    pub toc_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub children: Vec<NodeDict>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_node_kind_strings_match_json_keys() {
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::File.as_ref(), "file");
        assert_eq!(NodeKind::from_str("file").unwrap(), NodeKind::File);
        assert!(NodeKind::from_str("symlink").is_err());
    }

    #[test]
    fn test_node_dict_key_order() {
        let dict = NodeDict {
            name: "root".to_string(),
            toc_name: None,
            kind: NodeKind::Directory,
            children: vec![],
        };
        let json = serde_json::to_string(&dict).unwrap();
        assert_eq!(
            json,
            r#"{"name":"root","toc_name":null,"type":"directory","children":[]}"#
        );
    }
}
