/*!
 * Utility functions for structgen
 */

use std::env;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;

/// Directory holding the running executable; default inputs and outputs live
/// here and TOC file links are relative to it.
static INSTALL_DIR: Lazy<PathBuf> = Lazy::new(|| {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
});

/// Location of the tool itself
pub fn install_dir() -> &'static Path {
    &INSTALL_DIR
}

/// Make a path absolute against the current directory without touching the filesystem.
///
/// `.` and `..` components are collapsed lexically; `..` at the root stays at the root.
pub fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Render a path with `/` separators regardless of platform
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
