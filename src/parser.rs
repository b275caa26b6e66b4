/*!
 * Source loading and JSON-to-tree conversion
 *
 * A node is an object with exactly one of the `directory` / `file` keys holding
 * `[name]` or `[name, toc_name]`, plus an optional `children` array.
 */

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, StructGenError};
use crate::tree::Tree;
use crate::types::{Node, NodeId, NodeKind};
use crate::{bail, ensure};

pub const DIRECTORY_KEY: &str = "directory";
pub const FILE_KEY: &str = "file";
pub const CHILDREN_KEY: &str = "children";

/// Read the source file and parse it as JSON
pub fn read_source(path: &Path) -> Result<Value> {
    if path.is_dir() {
        return Err(StructGenError::SourceIsDirectory(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StructGenError::SourceNotFound(path.to_path_buf()),
        _ => StructGenError::Io(e),
    })?;

    Ok(serde_json::from_str(&content)?)
}

/// Build a tree from a JSON value, failing on the first malformed node
pub fn parse_tree(value: &Value) -> Result<Tree> {
    let location = "root".to_string();
    let object = as_node_object(value, &location)?;
    let root = parse_node(object, &location)?;

    let mut tree = Tree::with_root(root);
    let root_id = tree.root();
    parse_children(&mut tree, root_id, object, &location)?;

    debug!(nodes = tree.len(), root = %tree.root_node().name, "parsed layout");
    Ok(tree)
}

fn parse_children(
    tree: &mut Tree,
    parent: NodeId,
    object: &Map<String, Value>,
    location: &str,
) -> Result<()> {
    let children = match object.get(CHILDREN_KEY) {
        None => return Ok(()),
        Some(Value::Array(children)) => children,
        Some(_) => bail!(
            Configuration,
            "{}: \"{}\" must be a list of nodes",
            location,
            CHILDREN_KEY
        ),
    };

    for (index, child) in children.iter().enumerate() {
        let child_location = format!("{}.{}[{}]", location, CHILDREN_KEY, index);
        let child_object = as_node_object(child, &child_location)?;
        let node = parse_node(child_object, &child_location)?;
        let id = tree.push_child(parent, node);
        parse_children(tree, id, child_object, &child_location)?;
    }

    Ok(())
}

fn as_node_object<'a>(value: &'a Value, location: &str) -> Result<&'a Map<String, Value>> {
    match value {
        Value::Object(object) => Ok(object),
        _ => bail!(Configuration, "{}: node must be a JSON object", location),
    }
}

/// Parse the type key and name list of a single node, ignoring its children
fn parse_node(object: &Map<String, Value>, location: &str) -> Result<Node> {
    let (kind, names) = match (object.get(DIRECTORY_KEY), object.get(FILE_KEY)) {
        (Some(names), None) => (NodeKind::Directory, names),
        (None, Some(names)) => (NodeKind::File, names),
        (Some(_), Some(_)) => bail!(
            Configuration,
            "{}: node has both \"{}\" and \"{}\" keys",
            location,
            DIRECTORY_KEY,
            FILE_KEY
        ),
        (None, None) => bail!(
            Configuration,
            "{}: node needs a \"{}\" or \"{}\" key",
            location,
            DIRECTORY_KEY,
            FILE_KEY
        ),
    };

    for key in object.keys() {
        if key != DIRECTORY_KEY && key != FILE_KEY && key != CHILDREN_KEY {
            debug!(%location, %key, "ignoring unknown key");
        }
    }

    let names = match names {
        Value::Array(names) => names,
        _ => bail!(
            Configuration,
            "{}: \"{}\" must be a list of 1 or 2 names",
            location,
            kind
        ),
    };

    ensure!(
        (1..=2).contains(&names.len()),
        Configuration,
        "{}: \"{}\" must list 1 or 2 names, got {}",
        location,
        kind,
        names.len()
    );

    let mut strings = Vec::with_capacity(names.len());
    for name in names {
        match name {
            Value::String(s) => strings.push(s.clone()),
            other => bail!(
                Configuration,
                "{}: names must be strings, got {}",
                location,
                other
            ),
        }
    }

    let mut strings = strings.into_iter();
    let name = strings.next().unwrap_or_default();
    ensure!(!name.is_empty(), Configuration, "{}: name is empty", location);

    Ok(Node::new(name, strings.next(), kind))
}
