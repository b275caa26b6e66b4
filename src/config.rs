/*!
 * Configuration handling for structgen
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::{Result, StructGenError};
use crate::utils::install_dir;

pub const DEFAULT_SOURCE_FILE: &str = "default.json";
pub const DEFAULT_TEMPLATE_FILE: &str = "defaultTemplate.html";
pub const DEFAULT_HTML_FILE: &str = "index.html";
pub const DEFAULT_DEST_FILE: &str = "ProjectRoot";

/// Command-line arguments for structgen
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "structgen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create a report folder structure from JSON and render its table of contents",
    long_about = "Reads a JSON description of nested directories and files, creates that layout on disk and renders an HTML index page listing every entry that carries a TOC name.\n\nSmall JSON example:\n  {\"directory\": [\"Root Folder\", \"TOC Root Name\"],\n   \"children\": [{\"file\": [\"checkExample.txt\", \"File A-A-1\"]}]}"
)]
pub struct Args {
    /// JSON file describing the directory structure [default: <install dir>/default.json]
    #[clap(short = 'i', long = "source_file", value_name = "FILE")]
    pub source_file: Option<PathBuf>,

    /// Template for the HTML index page [default: <install dir>/defaultTemplate.html]
    #[clap(short = 't', long = "template_file", value_name = "FILE")]
    pub template_file: Option<PathBuf>,

    /// HTML page to create [default: <install dir>/index.html]
    #[clap(short = 'o', long = "html_file", value_name = "FILE")]
    pub html_file: Option<PathBuf>,

    /// Directory the structure is created in [default: <install dir>/ProjectRoot]
    #[clap(short = 'p', long = "dest_file", value_name = "DIR")]
    pub dest_file: Option<PathBuf>,

    /// Overwrite an existing destination without asking
    #[clap(short = 'y', long)]
    pub yes: bool,

    /// Print the parsed structure as JSON after the run
    #[clap(long)]
    pub dump_structure: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// JSON layout to read
    pub source_file: PathBuf,

    /// Template for the index page
    pub template_file: PathBuf,

    /// Output HTML page
    pub html_file: PathBuf,

    /// Destination root for the skeleton
    pub dest_file: PathBuf,

    /// Directory TOC file links are relative to
    pub link_base: PathBuf,

    /// Skip the overwrite confirmation
    pub assume_yes: bool,

    /// Print the structural export after the run
    pub dump_structure: bool,

    /// Log verbosity from `-v` flags
    pub verbosity: u8,
}

impl Config {
    /// Create configuration from command-line arguments, defaults live next to the binary
    pub fn from_args(args: Args) -> Self {
        Self::from_args_in(args, install_dir())
    }

    /// Create configuration with defaults resolved against `base`
    pub fn from_args_in(args: Args, base: &Path) -> Self {
        Self {
            source_file: args
                .source_file
                .unwrap_or_else(|| base.join(DEFAULT_SOURCE_FILE)),
            template_file: args
                .template_file
                .unwrap_or_else(|| base.join(DEFAULT_TEMPLATE_FILE)),
            html_file: args.html_file.unwrap_or_else(|| base.join(DEFAULT_HTML_FILE)),
            dest_file: args.dest_file.unwrap_or_else(|| base.join(DEFAULT_DEST_FILE)),
            link_base: base.to_path_buf(),
            assume_yes: args.yes,
            dump_structure: args.dump_structure,
            verbosity: args.verbose,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.source_file.exists() {
            return Err(StructGenError::SourceNotFound(self.source_file.clone()));
        }

        if self.source_file.is_dir() {
            return Err(StructGenError::SourceIsDirectory(self.source_file.clone()));
        }

        // Check if output file directory exists
        if let Some(parent) = self.html_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(StructGenError::InvalidArgument(format!(
                    "Output directory not found: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }
}
