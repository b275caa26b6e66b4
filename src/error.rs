//! Global error handling for structgen
//!
//! Every failure in a run is fatal, so a single error type covers the parser,
//! the materializer, the destination guard and the page renderer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for structgen operations
#[derive(Error, Debug)]
pub enum StructGenError {
    /// The source JSON does not describe a valid tree
    #[error("wrong configuration file (JSON) format: {0}")]
    Configuration(String),

    /// The source file does not exist
    #[error("configuration file does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The source path points at a folder instead of a JSON file
    #[error("specified JSON, gave folder: {}", .0.display())]
    SourceIsDirectory(PathBuf),

    /// Plain IO errors while reading inputs or writing the page
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The source file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors while creating or deleting the destination skeleton
    #[error("filesystem error on {}: {} ({:?})", .path.display(), .source, .source.kind())]
    Filesystem {
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// The operator refused to overwrite an existing destination
    #[error("destination {} already exists and was not overwritten", .0.display())]
    OverwriteDeclined(PathBuf),

    /// The template file could not be found
    #[error("template file does not exist: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Template syntax or rendering errors
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl StructGenError {
    /// Wrap an IO error that happened on `path` while touching the skeleton
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Specialized Result type for structgen operations
pub type Result<T> = std::result::Result<T, StructGenError>;

/// Creates a StructGenError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::StructGenError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
