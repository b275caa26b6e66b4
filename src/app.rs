/*!
 * One run of the tool: check the destination, build the skeleton, write the page
 */

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::info;

use crate::config::Config;
use crate::destination::{prepare_destination, DestinationHandler};
use crate::error::{Result, StructGenError};
use crate::materializer::Materializer;
use crate::report::RunReport;
use crate::template::PageTemplate;
use crate::tree::Tree;

/// Result of a successful run
#[derive(Debug)]
pub struct RunOutcome {
    /// The materialized tree
    pub tree: Tree,
    /// Statistics for the report table
    pub report: RunReport,
}

/// Run the whole pipeline with an explicit configuration.
///
/// The layout and the template are both loaded before the destination is
/// checked, so malformed input never deletes anything. The page is written last.
pub fn run(
    config: &Config,
    handler: &dyn DestinationHandler,
    progress: Arc<ProgressBar>,
) -> Result<RunOutcome> {
    let started = Instant::now();
    config.validate()?;

    let mut tree = Tree::from_path(&config.source_file)?;
    info!(source = %config.source_file.display(), nodes = tree.len(), "loaded layout");

    let template = PageTemplate::load(&config.template_file)?;

    let destination_status = prepare_destination(&config.dest_file, handler, config.assume_yes)?;

    let stats = Materializer::new(Arc::clone(&progress)).write(&mut tree, &config.dest_file)?;
    progress.finish_and_clear();
    println!("{}", stats.location_report());

    let page = template.render(&tree, &config.link_base)?;
    tree.print_tree();

    fs::write(&config.html_file, page)
        .map_err(|e| StructGenError::filesystem(&config.html_file, e))?;
    info!(html = %config.html_file.display(), "wrote index page");

    let report = RunReport {
        source_file: config.source_file.clone(),
        destination: stats.root.clone(),
        destination_status,
        html_file: config.html_file.clone(),
        directories: stats.directories,
        files: stats.files,
        toc_entries: tree.toc_entry_count(),
        duration: started.elapsed(),
    };

    Ok(RunOutcome { tree, report })
}
