/*!
 * Core types shared by the collector, tree renderer and dumper
 */

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Absolute paths of every exported file, in discovery order
pub type FileList = Vec<PathBuf>;

/// Path of a tree node relative to the root, one entry per segment
pub type Segments = Vec<String>;

/// Kind of a node in the rendered tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    /// Directory holding at least one exported file
    Directory,
    /// Exported file
    File,
}

/// Per-file statistics gathered while dumping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Number of lines written for the file
    pub lines: usize,
    /// Number of characters written for the file
    pub chars: usize,
    /// Content was decoded with the Latin-1 fallback
    pub fallback_decoded: bool,
    /// Content could not be read and a placeholder was written
    pub unreadable: bool,
}

/// Result of a completed export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Absolute path of the written document
    pub output_file: PathBuf,
    /// Root that was exported
    pub root: PathBuf,
    /// Time taken by the whole run
    pub duration: Duration,
    /// Statistics keyed by forward-slash relative path
    pub files: BTreeMap<String, FileStats>,
}

impl ExportSummary {
    /// Number of file sections written
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    /// Total lines across all sections
    pub fn total_lines(&self) -> usize {
        self.files.values().map(|f| f.lines).sum()
    }

    /// Total characters across all sections
    pub fn total_chars(&self) -> usize {
        self.files.values().map(|f| f.chars).sum()
    }

    /// Files whose section holds an error placeholder
    pub fn unreadable_files(&self) -> usize {
        self.files.values().filter(|f| f.unreadable).count()
    }
}
