/*!
 * structgen - Create a report folder structure from JSON and render its table of contents
 *
 * A JSON document describes nested directories and files. This library turns it
 * into a [`Tree`], creates the matching skeleton on disk and renders the
 * table-of-contents markup that an HTML template embeds.
 */

pub mod app;
pub mod config;
pub mod destination;
pub mod error;
pub mod logging;
pub mod materializer;
pub mod parser;
pub mod report;
pub mod template;
pub mod toc;
pub mod tree;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use config::Config;
pub use destination::{ConsoleHandler, DestinationHandler, DestinationStatus};
pub use error::{Result, StructGenError};
pub use materializer::{MaterializeStats, Materializer};
pub use report::{ReportFormat, Reporter, RunReport};
pub use template::PageTemplate;
pub use toc::TocRenderer;
pub use tree::Tree;
pub use types::{Node, NodeDict, NodeId, NodeKind};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
