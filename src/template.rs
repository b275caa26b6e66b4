/*!
 * Page rendering through a Jinja-compatible template
 *
 * The template is opaque input. It receives a `tree` object whose
 * `print_django()` method yields the TOC markup, the same markup as `toc`,
 * and a `generated_at` timestamp.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use minijinja::value::{Enumerator, Object, Value};
use minijinja::{context, AutoEscape, Environment, Error, ErrorKind, State};
use tracing::debug;

use crate::error::{Result, StructGenError};
use crate::tree::Tree;
use crate::utils::to_forward_slashes;

/// Template context view of a tree
#[derive(Debug)]
struct TreeObject {
    name: String,
    toc_name: Option<String>,
    path: Option<String>,
    toc: String,
}

impl Object for TreeObject {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "name" => Some(Value::from(self.name.clone())),
            "toc_name" => Some(Value::from(self.toc_name.clone())),
            "path" => Some(Value::from(self.path.clone())),
            "toc" => Some(Value::from_safe_string(self.toc.clone())),
            _ => None,
        }
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(&["name", "toc_name", "path", "toc"])
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        _args: &[Value],
    ) -> std::result::Result<Value, Error> {
        match method {
            "print_django" => Ok(Value::from_safe_string(self.toc.clone())),
            _ => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("tree has no method named {}", method),
            )),
        }
    }
}

/// A loaded page template
#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
    origin: PathBuf,
}

impl PageTemplate {
    /// Read the template file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StructGenError::TemplateNotFound(path.to_path_buf()),
            _ => StructGenError::Io(e),
        })?;
        Ok(Self {
            source,
            origin: path.to_path_buf(),
        })
    }

    /// Use template text that did not come from a file
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            origin: PathBuf::from("<inline>"),
        }
    }

    /// Render the page for `tree`, with file links relative to `link_base`
    pub fn render(&self, tree: &Tree, link_base: &Path) -> Result<String> {
        let toc = tree.toc_markup(link_base);
        let root = tree.root_node();
        let object = TreeObject {
            name: root.name.clone(),
            toc_name: root.toc_name.clone(),
            path: tree.path().map(to_forward_slashes),
            toc: toc.clone(),
        };

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let page = env.render_str(
            &self.source,
            context! {
                tree => Value::from_object(object),
                toc => Value::from_safe_string(toc),
                generated_at => Local::now().to_rfc3339(),
            },
        )?;

        debug!(template = %self.origin.display(), bytes = page.len(), "rendered page");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Tree {
        let mut tree = Tree::from_json_str(
            r#"{"directory":["Report","My Report"],"children":[{"file":["a.htm","A"]}]}"#,
        )
        .unwrap();
        tree.set_path(PathBuf::from("/base/out"));
        tree
    }

    #[test]
    fn test_print_django_method_matches_toc() {
        let tree = tree();
        let page = PageTemplate::from_source("<ul>\n{{ tree.print_django() }}</ul>")
            .render(&tree, Path::new("/base"))
            .unwrap();
        assert_eq!(page, format!("<ul>\n{}</ul>", tree.toc_markup("/base")));
        assert!(page.contains("href=\"out/Report/a.htm\""));
    }

    #[test]
    fn test_context_attributes() {
        let page = PageTemplate::from_source(
            "{{ tree.name }}|{{ tree.toc_name }}|{{ tree.path }}|{% if toc %}listed{% endif %}",
        )
        .render(&tree(), Path::new("/base"))
        .unwrap();
        assert_eq!(page, "Report|My Report|/base/out|listed");
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let page = PageTemplate::from_source("{{ toc }}")
            .render(&tree(), Path::new("/base"))
            .unwrap();
        assert!(page.contains("<li>"));
        assert!(!page.contains("&lt;"));
    }

    #[test]
    fn test_syntax_error() {
        let err = PageTemplate::from_source("{% if %}")
            .render(&tree(), Path::new("/base"))
            .unwrap_err();
        assert!(matches!(err, StructGenError::Template(_)));
    }

    #[test]
    fn test_missing_template_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = PageTemplate::load(&temp.path().join("missing.html")).unwrap_err();
        assert!(matches!(err, StructGenError::TemplateNotFound(_)));
    }
}
