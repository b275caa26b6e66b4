/*!
 * Pre-flight handling of an already existing destination
 *
 * Asking the operator and deleting directories are kept behind
 * [`DestinationHandler`] so the run can be driven without a console.
 */

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use dialoguer::Confirm;
use tracing::{info, warn};

use crate::error::{Result, StructGenError};

/// Prompt shown before an existing destination is deleted
pub const OVERWRITE_PROMPT: &str = "WARNING: dest_file already exists. Overwrite?";

/// Interval between checks that a removed directory is really gone
const SETTLE_POLL: Duration = Duration::from_millis(10);

/// Longest time to wait for a removed directory to disappear
const SETTLE_DEADLINE: Duration = Duration::from_secs(2);

/// Collaborator for operator interaction and destructive filesystem work
pub trait DestinationHandler {
    /// Ask the operator a yes/no question
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Recursively delete `path`
    fn remove_tree(&self, path: &Path) -> Result<()>;
}

/// What the pre-flight check did to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationStatus {
    /// Nothing was there
    Fresh,
    /// An existing directory was deleted
    Cleared,
}

/// Make sure `destination` can be created.
///
/// An existing directory is only deleted after the handler confirms, unless
/// `assume_yes` is set. Declining leaves it untouched and fails with
/// [`StructGenError::OverwriteDeclined`].
pub fn prepare_destination(
    destination: &Path,
    handler: &dyn DestinationHandler,
    assume_yes: bool,
) -> Result<DestinationStatus> {
    if !destination.exists() {
        return Ok(DestinationStatus::Fresh);
    }

    if !destination.is_dir() {
        return Err(StructGenError::filesystem(
            destination,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination exists and is not a directory",
            ),
        ));
    }

    if !assume_yes && !handler.confirm(OVERWRITE_PROMPT)? {
        info!(destination = %destination.display(), "overwrite declined");
        return Err(StructGenError::OverwriteDeclined(destination.to_path_buf()));
    }

    handler.remove_tree(destination)?;
    warn!(destination = %destination.display(), "existing directory deleted");
    Ok(DestinationStatus::Cleared)
}

/// Console implementation: dialoguer prompt on a terminal, a plain `y` line otherwise
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHandler;

impl DestinationHandler for ConsoleHandler {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if io::stdin().is_terminal() {
            return Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(|e| {
                    StructGenError::Unexpected(format!("Failed to get user input: {}", e))
                });
        }

        print!("{} (y/n)", prompt);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim() == "y")
    }

    fn remove_tree(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| StructGenError::filesystem(path, e))?;
        wait_until_removed(path)
    }
}

/// Poll until `path` no longer exists, some platforms finish deletion asynchronously
fn wait_until_removed(path: &Path) -> Result<()> {
    let started = Instant::now();
    while path.exists() {
        if started.elapsed() >= SETTLE_DEADLINE {
            return Err(StructGenError::filesystem(
                path,
                io::Error::new(io::ErrorKind::TimedOut, "directory still present after removal"),
            ));
        }
        thread::sleep(SETTLE_POLL);
    }
    Ok(())
}
