/*!
 * File contents section of the export document
 */

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::types::FileStats;
use crate::utils::to_slash_path;

/// Delimiter line opening the section of `rel_path`
pub fn delimiter(rel_path: &str) -> String {
    format!("--- FILE: {} ---", rel_path)
}

/// Decode bytes as UTF-8, falling back to Latin-1
///
/// Returns the text and whether the fallback was used. Latin-1 maps every
/// byte to the code point of the same value, so it never fails.
pub fn decode_text(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(e) => {
            let text = e.into_bytes().into_iter().map(char::from).collect();
            (text, true)
        }
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Read a file as text with newline normalization and decoding fallback
pub fn read_text(path: &Path) -> io::Result<(String, bool)> {
    let (text, fallback) = decode_text(fs::read(path)?);
    let text = if text.contains('\r') {
        normalize_newlines(&text).into_owned()
    } else {
        text
    };
    Ok((text, fallback))
}

/// Writes one delimited section per file
pub struct ContentDumper {
    /// Root the section paths are relative to
    root: PathBuf,
    /// Progress bar advanced once per file
    progress: ProgressBar,
}

impl ContentDumper {
    /// Create a new dumper
    pub fn new(root: impl Into<PathBuf>, progress: ProgressBar) -> Self {
        Self {
            root: root.into(),
            progress,
        }
    }

    /// Write a section for every file in ascending path order
    ///
    /// Read failures of single files are written into their section; only
    /// failures writing to `out` are returned.
    pub fn dump<W: Write>(
        &self,
        files: &[PathBuf],
        out: &mut W,
    ) -> io::Result<BTreeMap<String, FileStats>> {
        let mut sorted = files.to_vec();
        sorted.sort();

        let mut stats = BTreeMap::new();
        for path in &sorted {
            let rel_path = self.relative(path);
            self.progress.set_message(rel_path.clone());

            let file_stats = self.dump_file(path, &rel_path, out)?;
            stats.insert(rel_path, file_stats);

            self.progress.inc(1);
        }

        Ok(stats)
    }

    fn dump_file<W: Write>(
        &self,
        path: &Path,
        rel_path: &str,
        out: &mut W,
    ) -> io::Result<FileStats> {
        writeln!(out, "{}", delimiter(rel_path))?;

        let mut stats = FileStats::default();
        let mut content = match read_text(path) {
            Ok((text, fallback)) => {
                if fallback {
                    log::debug!("Decoded {} as Latin-1", rel_path);
                }
                stats.fallback_decoded = fallback;
                text
            }
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                stats.unreadable = true;
                format!("[Error reading file: {}]", e)
            }
        };

        if !content.ends_with('\n') {
            content.push('\n');
        }

        stats.lines = content.lines().count();
        stats.chars = content.chars().count();

        out.write_all(content.as_bytes())?;
        out.write_all(b"\n")?;

        Ok(stats)
    }

    /// Forward-slash path relative to the root, or the full path if outside it
    fn relative(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => to_slash_path(rel),
            Err(_) => path.to_string_lossy().into_owned(),
        }
    }
}
