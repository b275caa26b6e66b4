/*!
 * Table-of-contents markup
 *
 * Only nodes with a TOC label become list items. Unlabeled nodes are still
 * walked, so an entry can sit several layout levels below its nearest listed
 * ancestor.
 */

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::tree::Tree;
use crate::types::{NodeId, NodeKind};
use crate::utils::{absolutize, to_forward_slashes};

/// Indentation every line starts with
const BASE_INDENT: &str = "        ";

/// Indentation added per nesting level
const LEVEL_INDENT: &str = "  ";

/// Link target for directory entries
const DIRECTORY_HREF: &str = "./img/Default.htm";

/// Frame the links open in
const LINK_TARGET: &str = "ContentFrame";

/// Renders the nested `<li>`/`<ul>` fragment for a tree
pub struct TocRenderer {
    /// Directory file links are made relative to
    link_base: PathBuf,
}

impl TocRenderer {
    pub fn new(link_base: impl Into<PathBuf>) -> Self {
        Self {
            link_base: link_base.into(),
        }
    }

    /// Render the markup. Output only depends on the tree and the link base.
    pub fn render(&self, tree: &Tree) -> String {
        let mut out = String::new();
        self.render_node(tree, tree.root(), 1, &mut out);
        out
    }

    fn render_node(&self, tree: &Tree, id: NodeId, level: usize, out: &mut String) {
        let node = tree.node(id);
        let mut child_level = level;

        if let Some(toc_name) = &node.toc_name {
            let href = match node.kind {
                NodeKind::Directory => DIRECTORY_HREF.to_string(),
                NodeKind::File => self.file_link(tree, id),
            };
            line(out, level, "<li>");
            line(
                out,
                level,
                &format!(
                    "<a href=\"{}\" target=\"{}\">{}</a>",
                    href, LINK_TARGET, toc_name
                ),
            );
            if node.kind == NodeKind::Directory {
                line(out, level, "<ul>");
            }
            child_level += 1;
        }

        for &child in tree.children(id) {
            self.render_node(tree, child, child_level, out);
        }

        if node.is_listed() {
            if node.kind == NodeKind::Directory {
                line(out, level, "</ul>");
            }
            line(out, level, "</li>");
        }
    }

    /// Link to a file node, relative to the link base with `/` separators
    fn file_link(&self, tree: &Tree, id: NodeId) -> String {
        let link = match tree.path() {
            Some(_) => relative_to(&tree.node_path(id), &self.link_base),
            None => tree.relative_path(id),
        };
        to_forward_slashes(&link)
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path = absolutize(path);
    let base = absolutize(base);
    pathdiff::diff_paths(&path, &base).unwrap_or(path)
}

fn line(out: &mut String, level: usize, content: &str) {
    let _ = writeln!(
        out,
        "{}{}{}",
        LEVEL_INDENT.repeat(level),
        BASE_INDENT,
        content
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const LAYOUT: &str = r#"{
        "directory": ["Report", "Report"],
        "children": [
            {"file": ["intro.htm", "Introduction"]},
            {"directory": ["data"], "children": [
                {"file": ["table.htm", "Table"]},
                {"file": ["raw.csv"]}
            ]},
            {"directory": ["img"]}
        ]
    }"#;

    #[test]
    fn test_markup_layout() {
        let mut tree = Tree::from_json_str(LAYOUT).unwrap();
        tree.set_path(PathBuf::from("/srv/tool/ProjectRoot"));

        let markup = TocRenderer::new("/srv/tool").render(&tree);

        let expected = concat!(
            "          <li>\n",
            "          <a href=\"./img/Default.htm\" target=\"ContentFrame\">Report</a>\n",
            "          <ul>\n",
            "            <li>\n",
            "            <a href=\"ProjectRoot/Report/intro.htm\" target=\"ContentFrame\">Introduction</a>\n",
            "            </li>\n",
            "            <li>\n",
            "            <a href=\"ProjectRoot/Report/data/table.htm\" target=\"ContentFrame\">Table</a>\n",
            "            </li>\n",
            "          </ul>\n",
            "          </li>\n",
        );
        assert_eq!(markup, expected);
    }

    #[test]
    fn test_unlabeled_root_keeps_level() {
        let mut tree = Tree::from_json_str(
            r#"{"directory":["root"],"children":[{"file":["a.htm","A"]}]}"#,
        )
        .unwrap();
        tree.set_path(PathBuf::from("/base/out"));

        let markup = TocRenderer::new("/base").render(&tree);
        assert_eq!(
            markup,
            concat!(
                "          <li>\n",
                "          <a href=\"out/root/a.htm\" target=\"ContentFrame\">A</a>\n",
                "          </li>\n",
            )
        );
    }

    #[test]
    fn test_labeled_file_with_children_nests_inside_item() {
        let tree = Tree::from_json_str(
            r#"{"file":["a.htm","A"],"children":[{"file":["b.htm","B"]}]}"#,
        )
        .unwrap();

        let markup = TocRenderer::new("/unused").render(&tree);
        let lines: Vec<&str> = markup.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "          <li>");
        assert_eq!(lines[2], "            <li>");
        assert_eq!(
            lines[3],
            "            <a href=\"a.htm/b.htm\" target=\"ContentFrame\">B</a>"
        );
        assert_eq!(lines[5], "          </li>");
    }

    #[test]
    fn test_nothing_listed_renders_empty() {
        let tree = Tree::from_json_str(r#"{"directory":["root"],"children":[{"file":["a"]}]}"#)
            .unwrap();
        assert_eq!(TocRenderer::new("/").render(&tree), "");
    }

    #[test]
    fn test_link_base_outside_destination() {
        let mut tree = Tree::from_json_str(r#"{"file":["a.htm","A"]}"#).unwrap();
        tree.set_path(PathBuf::from("/data/out"));

        let markup = TocRenderer::new("/opt/tool").render(&tree);
        assert!(markup.contains("href=\"../../data/out/a.htm\""));
    }

    #[test]
    fn test_parent_segments_in_destination_are_collapsed() {
        let mut tree = Tree::from_json_str(r#"{"file":["a.htm","A"]}"#).unwrap();
        tree.set_path(PathBuf::from("/data/x/../out"));

        let markup = TocRenderer::new("/opt/tool/.").render(&tree);
        assert!(markup.contains("href=\"../../data/out/a.htm\""));
        assert!(!markup.contains("/x/"));
    }
}
