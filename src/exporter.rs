/*!
 * Export document assembly: collect, render the tree, dump contents
 */

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::ProgressBar;

use crate::collector::Collector;
use crate::config::Config;
use crate::dumper::ContentDumper;
use crate::error::{OutputContext, Result};
use crate::tree::{ChildIndex, TreeGlyphs, TreeRenderer};
use crate::types::{ExportSummary, FileStats};

/// Title of the tree section
pub const TREE_HEADER: &str = "REPO TREE";
/// Underline of the tree section title
pub const TREE_RULE: &str = "========";
/// Title of the file contents section
pub const CONTENTS_HEADER: &str = "FILE CONTENTS (latest)";
/// Underline of the file contents section title
pub const CONTENTS_RULE: &str = "======================";

/// Runs a complete export for one configuration
pub struct Exporter {
    /// Export configuration
    config: Config,
    /// Progress bar for the dump phase
    progress: ProgressBar,
    /// Tree connectors
    glyphs: TreeGlyphs,
}

impl Exporter {
    /// Create a new exporter
    pub fn new(config: Config, progress: ProgressBar) -> Self {
        Self {
            config,
            progress,
            glyphs: TreeGlyphs::default(),
        }
    }

    /// Use custom tree connectors
    pub fn with_glyphs(mut self, glyphs: TreeGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Collect the files and write the document, truncating any previous one
    pub fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();

        let root = fs::canonicalize(&self.config.target_dir)?;
        let output_file = canonical_output(&self.config.output_path(&root))?;
        log::info!("Exporting {} to {}", root.display(), output_file.display());

        let files = Collector::new(&root).skip_output(&output_file).collect()?;
        self.progress.set_length(files.len() as u64);

        let file = File::create(&output_file).for_output(&output_file)?;
        let mut writer = BufWriter::new(file);
        let stats = self
            .render_document(&root, &files, &mut writer)
            .for_output(&output_file)?;
        writer.flush().for_output(&output_file)?;

        Ok(ExportSummary {
            output_file,
            root,
            duration: start_time.elapsed(),
            files: stats,
        })
    }

    /// Write the tree section followed by the file contents section
    pub fn render_document<W: Write>(
        &self,
        root: &Path,
        files: &[PathBuf],
        out: &mut W,
    ) -> io::Result<BTreeMap<String, FileStats>> {
        let index = ChildIndex::build(root, files);
        let lines = TreeRenderer::new(self.glyphs.clone()).render(&index);
        log::debug!("Rendered {} tree lines", lines.len());

        writeln!(out, "{}", TREE_HEADER)?;
        writeln!(out, "{}", TREE_RULE)?;
        out.write_all(lines.join("\n").as_bytes())?;
        out.write_all(b"\n\n")?;

        writeln!(out, "{}", CONTENTS_HEADER)?;
        writeln!(out, "{}", CONTENTS_RULE)?;
        out.write_all(b"\n")?;

        ContentDumper::new(root, self.progress.clone()).dump(files, out)
    }
}

/// Canonicalize the output's directory so it compares equal to the
/// path the collector sees for the same file
fn canonical_output(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| crate::error!(Config, "Output path has no file name: {}", path.display()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent)?,
        _ => std::env::current_dir()?,
    };
    Ok(parent.join(file_name))
}
