/*!
 * Reporting functionality for repo-export
 *
 * Renders an export summary as console tables using the tabled library.
 */

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::ExportSummary;
use crate::utils::format_number;

/// Files listed individually before the table switches to the largest ones
const MAX_LISTED_FILES: usize = 15;
/// Files shown when the export is larger than that
const TOP_FILES: usize = 10;

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for export results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for an export
    pub fn generate_report(&self, summary: &ExportSummary) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(summary),
        }
    }

    /// Print the report to stderr, keeping stdout for the document path
    pub fn print_report(&self, summary: &ExportSummary) {
        eprintln!("\n{}", self.generate_report(summary));
    }

    // Keep the tail of long paths, cut at a segment boundary
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut kept: Vec<&str> = Vec::new();
        let mut len = 3;
        for part in path.rsplit('/') {
            let part_len = part.chars().count() + 1;
            if len + part_len > max_len && !kept.is_empty() {
                break;
            }
            kept.push(part);
            len += part_len;
        }
        kept.reverse();

        format!(".../{}", kept.join("/"))
    }

    fn create_summary_table(&self, summary: &ExportSummary) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Output File".to_string(),
                value: summary.output_file.display().to_string(),
            },
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", summary.duration),
            },
            SummaryRow {
                key: "Files Exported".to_string(),
                value: format_number(summary.files_processed()),
            },
            SummaryRow {
                key: "Total Lines".to_string(),
                value: format_number(summary.total_lines()),
            },
            SummaryRow {
                key: "LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    format_number(summary.total_chars() / 4)
                ),
            },
        ];

        let unreadable = summary.unreadable_files();
        if unreadable > 0 {
            rows.push(SummaryRow {
                key: "Unreadable Files".to_string(),
                value: unreadable.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, summary: &ExportSummary) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        // Largest first
        let mut files: Vec<_> = summary.files.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
        if files.len() > MAX_LISTED_FILES {
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|(path, info)| {
                let mut display_path = self.format_path(path, 60);
                if info.unreadable {
                    display_path.push_str(" (unreadable)");
                }
                FileRow {
                    path: display_path,
                    lines: format_number(info.lines),
                    tokens: format_number(info.chars / 4),
                }
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, summary: &ExportSummary) -> String {
        let files_title = if summary.files.len() > MAX_LISTED_FILES {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "EXPORTED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(summary),
            "EXPORT COMPLETE",
            self.create_summary_table(summary)
        )
    }
}
