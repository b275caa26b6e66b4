/*!
 * Tree model for a directory/file layout
 *
 * Nodes live in an arena owned by the [`Tree`]; children and parent links are
 * [`NodeId`] indices into it, so the parent back-reference never owns anything.
 */

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;
use crate::materializer::{MaterializeStats, Materializer};
use crate::parser;
use crate::toc::TocRenderer;
use crate::types::{Node, NodeDict, NodeId, NodeKind};
use crate::utils::install_dir;

/// Marker repeated once per level in the console dump
const DUMP_MARKER: char = '|';

/// Width of the rule printed above the console dump
const DUMP_RULE_WIDTH: usize = 40;

/// A parsed layout, ready to be materialized and rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Destination root, recorded once the tree has been written to disk
    path: Option<PathBuf>,
}

impl Tree {
    /// Start a tree from its root node
    pub fn with_root(mut root: Node) -> Self {
        root.parent = None;
        root.children.clear();
        Self {
            nodes: vec![root],
            root: NodeId(0),
            path: None,
        }
    }

    /// Append `node` as the last child of `parent` and backfill its parent link
    pub fn push_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Load and validate the layout stored in a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let value = parser::read_source(path.as_ref())?;
        Self::from_value(&value)
    }

    /// Parse a layout from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a tree from an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        parser::parse_tree(value)
    }

    /// Rebuild a tree from its structural export
    pub fn from_dict(dict: &NodeDict) -> Self {
        let mut tree = Self::with_root(Node::new(
            dict.name.clone(),
            dict.toc_name.clone(),
            dict.kind,
        ));
        let root = tree.root;
        tree.extend_from_dict(root, &dict.children);
        tree
    }

    fn extend_from_dict(&mut self, parent: NodeId, children: &[NodeDict]) {
        for child in children {
            let id = self.push_child(
                parent,
                Node::new(child.name.clone(), child.toc_name.clone(), child.kind),
            );
            self.extend_from_dict(id, &child.children);
        }
    }

    /// Ordered structural export of the whole tree
    pub fn as_dict(&self) -> NodeDict {
        self.dict_of(self.root)
    }

    fn dict_of(&self, id: NodeId) -> NodeDict {
        let node = self.node(id);
        NodeDict {
            name: node.name.clone(),
            toc_name: node.toc_name.clone(),
            kind: node.kind,
            children: node.children.iter().map(|&c| self.dict_of(c)).collect(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        self.node(self.root)
    }

    /// Look up a node. Ids are only handed out by this tree, so they are always valid.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root, so it is never empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes of the given kind
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Number of nodes carrying a TOC label
    pub fn toc_entry_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_listed()).count()
    }

    /// Destination root recorded by the last materialization
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// Path of a node relative to the destination root, built by following parent links
    pub fn relative_path(&self, id: NodeId) -> PathBuf {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.iter().rev().collect()
    }

    /// Path of a node on disk, or relative to the root when not materialized yet
    pub fn node_path(&self, id: NodeId) -> PathBuf {
        match &self.path {
            Some(dest) => dest.join(self.relative_path(id)),
            None => self.relative_path(id),
        }
    }

    /// Depth-first, parent-before-children traversal in source order
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    /// Create the skeleton under `destination`, remember it for link computation
    /// and tell the user where it was created
    pub fn write_tree(&mut self, destination: impl AsRef<Path>) -> Result<MaterializeStats> {
        let stats = Materializer::hidden().write(self, destination.as_ref())?;
        println!("{}", stats.location_report());
        Ok(stats)
    }

    /// Indented console dump, one line per node
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        out.push_str(&"=".repeat(DUMP_RULE_WIDTH));
        out.push('\n');
        out.push_str(&self.to_string());
        out.push('\n');

        for (id, depth) in self.depth_first() {
            let marker = DUMP_MARKER.to_string().repeat(depth.max(1));
            out.push_str(&format!("{} {}\n", marker, self.node(id).name));
        }

        out
    }

    /// Print the console dump to stdout
    pub fn print_tree(&self) {
        print!("{}", self.render_tree());
    }

    /// TOC markup with file links relative to `link_base`
    pub fn toc_markup(&self, link_base: impl AsRef<Path>) -> String {
        TocRenderer::new(link_base.as_ref()).render(self)
    }

    /// TOC markup with file links relative to the tool's install location
    pub fn print_django(&self) -> String {
        self.toc_markup(install_dir())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<TREE: {}>", self.root_node().name)
    }
}

/// Iterator returned by [`Tree::depth_first`], yielding `(node, depth)` pairs
pub struct DepthFirst<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for DepthFirst<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        self.stack.extend(
            self.tree
                .children(id)
                .iter()
                .rev()
                .map(|&child| (child, depth + 1)),
        );
        Some((id, depth))
    }
}
