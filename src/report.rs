/*!
 * Reporting functionality for structgen
 *
 * Summarizes a run in a console table using the tabled library.
 */

use std::path::PathBuf;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::destination::DestinationStatus;
use crate::utils::format_number;

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Source JSON the layout came from
    pub source_file: PathBuf,
    /// Destination root the skeleton was created under
    pub destination: PathBuf,
    /// Whether an existing destination had to be deleted first
    pub destination_status: DestinationStatus,
    /// Generated HTML page
    pub html_file: PathBuf,
    /// Number of directories created
    pub directories: usize,
    /// Number of files created
    pub files: usize,
    /// Number of entries listed in the table of contents
    pub toc_entries: usize,
    /// Time the whole run took
    pub duration: Duration,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let destination = match report.destination_status {
            DestinationStatus::Fresh => report.destination.display().to_string(),
            DestinationStatus::Cleared => {
                format!("{} (overwritten)", report.destination.display())
            }
        };

        let rows = vec![
            SummaryRow {
                key: "📄 Source File".to_string(),
                value: report.source_file.display().to_string(),
            },
            SummaryRow {
                key: "📂 Destination".to_string(),
                value: destination,
            },
            SummaryRow {
                key: "🌐 HTML File".to_string(),
                value: report.html_file.display().to_string(),
            },
            SummaryRow {
                key: "🗂️ Directories".to_string(),
                value: format_number(report.directories),
            },
            SummaryRow {
                key: "📝 Files".to_string(),
                value: format_number(report.files),
            },
            SummaryRow {
                key: "📋 TOC Entries".to_string(),
                value: format_number(report.toc_entries),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        format!("✅  STRUCTURE CREATED\n{}", self.create_summary_table(report))
    }
}
