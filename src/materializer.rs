/*!
 * Creates the directory/file skeleton described by a tree
 */

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::error::{Result, StructGenError};
use crate::tree::Tree;
use crate::types::{NodeId, NodeKind};

/// Counts of what a materialization created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    /// Destination root the skeleton was created under
    pub root: PathBuf,
    /// Number of directories created
    pub directories: usize,
    /// Number of empty files created
    pub files: usize,
}

impl MaterializeStats {
    /// Console lines telling the user where the skeleton lives
    pub fn location_report(&self) -> String {
        format!("Directories and files located at:\n{}\n", self.root.display())
    }
}

/// Walks a tree and creates real directories and empty files
pub struct Materializer {
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Materializer {
    /// Create a new materializer reporting through `progress`
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self { progress }
    }

    /// Materializer without any console output
    pub fn hidden() -> Self {
        Self::new(Arc::new(ProgressBar::hidden()))
    }

    /// Create every node of `tree` under `destination`.
    ///
    /// Parents are created before their children, children in source order.
    /// The first filesystem error aborts the walk; whatever was already created
    /// stays on disk.
    pub fn write(&self, tree: &mut Tree, destination: &Path) -> Result<MaterializeStats> {
        let mut stats = MaterializeStats {
            root: destination.to_path_buf(),
            ..Default::default()
        };

        self.progress.set_length(tree.len() as u64);
        self.progress.set_position(0);
        self.make(tree, tree.root(), destination, &mut stats)?;

        tree.set_path(destination.to_path_buf());
        info!(
            destination = %destination.display(),
            directories = stats.directories,
            files = stats.files,
            "materialized layout"
        );

        Ok(stats)
    }

    fn make(
        &self,
        tree: &Tree,
        id: NodeId,
        parent_path: &Path,
        stats: &mut MaterializeStats,
    ) -> Result<()> {
        let node = tree.node(id);
        let path = parent_path.join(&node.name);
        self.progress.set_message(path.display().to_string());

        match node.kind {
            NodeKind::Directory => {
                fs::create_dir_all(&path).map_err(|e| StructGenError::filesystem(&path, e))?;
                stats.directories += 1;
            }
            NodeKind::File => {
                // Append mode creates the file without ever truncating it.
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|e| StructGenError::filesystem(&path, e))?;
                stats.files += 1;
            }
        }
        debug!(kind = %node.kind, path = %path.display(), "created");
        self.progress.inc(1);

        for &child in tree.children(id) {
            self.make(tree, child, &path, stats)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_single_file_under_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("D");
        let mut tree =
            Tree::from_json_str(r#"{"directory":["root"],"children":[{"file":["a.txt"]}]}"#)
                .unwrap();

        let stats = tree.write_tree(&dest).unwrap();

        assert!(dest.join("root").is_dir());
        let file = dest.join("root").join("a.txt");
        assert!(file.is_file());
        assert_eq!(fs::metadata(&file).unwrap().len(), 0);
        assert_eq!(stats.directories, 1);
        assert_eq!(stats.files, 1);
        assert_eq!(tree.path(), Some(dest.as_path()));
        assert_eq!(
            stats.location_report(),
            format!("Directories and files located at:\n{}\n", dest.display())
        );
    }

    #[test]
    fn test_existing_file_content_is_kept() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("root")).unwrap();
        fs::write(temp.path().join("root").join("a.txt"), "keep").unwrap();

        let mut tree =
            Tree::from_json_str(r#"{"directory":["root"],"children":[{"file":["a.txt"]}]}"#)
                .unwrap();
        tree.write_tree(temp.path()).unwrap();

        let content = fs::read_to_string(temp.path().join("root").join("a.txt")).unwrap();
        assert_eq!(content, "keep");
    }

    #[test]
    fn test_file_with_children_fails_with_path() {
        let temp = tempfile::tempdir().unwrap();
        let mut tree =
            Tree::from_json_str(r#"{"file":["a.txt"],"children":[{"file":["b.txt"]}]}"#).unwrap();

        let err = tree.write_tree(temp.path()).unwrap_err();
        match err {
            StructGenError::Filesystem { path, .. } => {
                assert_eq!(path, temp.path().join("a.txt").join("b.txt"));
            }
            other => panic!("expected filesystem error, got {:?}", other),
        }
        assert!(temp.path().join("a.txt").is_file());
        assert_eq!(tree.path(), None);
    }
}
