/*!
 * Directory traversal producing the list of exported files
 */

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::types::FileList;
use crate::utils::is_excluded_name;

/// Walks the root and collects every non-excluded file
pub struct Collector {
    /// Directory being exported
    root: PathBuf,
    /// Document written by this run, never collected
    output_file: Option<PathBuf>,
}

impl Collector {
    /// Create a collector for `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_file: None,
        }
    }

    /// Skip the given output document during traversal
    pub fn skip_output(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    /// Walk the root top-down and return the exported files
    ///
    /// Excluded directories are pruned before descending, so nothing below
    /// them is ever visited. Any traversal error aborts the walk.
    pub fn collect(&self) -> Result<FileList> {
        let mut files = FileList::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.should_prune(e));

        for entry in walker {
            let entry = entry?;
            if entry.depth() == 0 {
                continue;
            }

            if !self.is_exportable(&entry) {
                continue;
            }

            if self.is_output(entry.path()) {
                log::debug!("Skipping output document {}", entry.path().display());
                continue;
            }

            files.push(entry.into_path());
        }

        log::info!(
            "Collected {} files under {}",
            files.len(),
            self.root.display()
        );

        Ok(files)
    }

    /// Check whether an entry is cut from the traversal along with its subtree
    pub fn should_prune(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if is_excluded_name(&name) {
            log::debug!("Pruning excluded entry {}", entry.path().display());
            return true;
        }

        false
    }

    /// Regular files, and symlinks not pointing at a directory
    ///
    /// Broken symlinks are kept; reading them fails later and their section
    /// gets an error placeholder.
    fn is_exportable(&self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        if file_type.is_file() {
            return true;
        }

        if file_type.is_symlink() {
            if entry.path().is_dir() {
                log::debug!("Not descending into symlink {}", entry.path().display());
                return false;
            }
            return true;
        }

        false
    }

    fn is_output(&self, path: &Path) -> bool {
        self.output_file.as_deref() == Some(path)
    }
}
