/*!
 * repo-export - Snapshot a source tree into a single text document
 *
 * This library walks a directory, skipping dependency, build and VCS
 * directories, renders an ASCII tree of what remains and concatenates the
 * contents of every file into one document.
 */

pub mod clipboard;
pub mod collector;
pub mod config;
pub mod dumper;
pub mod error;
pub mod exporter;
pub mod report;
pub mod tree;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use collector::Collector;
pub use config::Config;
pub use dumper::ContentDumper;
pub use error::{ExportError, Result};
pub use exporter::Exporter;
pub use report::{ReportFormat, Reporter};
pub use tree::{ChildIndex, TreeGlyphs, TreeRenderer};
pub use types::{EntryKind, ExportSummary, FileList, FileStats};
pub use utils::EXCLUDED_DIRS;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
