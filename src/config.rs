/*!
 * Configuration handling for repo-export
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;

/// Name of the export document written under the target directory
pub const DEFAULT_OUTPUT_FILE: &str = "_repo_export.txt";

/// Command-line arguments for repo-export
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "repo-export",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export a directory as an ASCII tree followed by every file's contents",
    long_about = "Walks a directory (skipping node_modules, .next, dist and .git), renders a tree of the remaining files and concatenates their contents into a single text document."
)]
pub struct Args {
    /// Directory to export
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output document, relative to the exported directory unless absolute
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Copy the document to the system clipboard
    #[clap(long)]
    pub clip: bool,

    /// Print a summary report to stderr
    #[clap(long)]
    pub stats: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all logging
    #[clap(short, long)]
    pub quiet: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to export
    pub target_dir: PathBuf,

    /// Output document path as given
    pub output_file: PathBuf,

    /// Copy output to clipboard
    pub clip: bool,

    /// Print the summary report
    pub stats: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            clip: args.clip,
            stats: args.stats,
        }
    }

    /// Configuration exporting `dir` into the default document name
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: dir.into(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            clip: false,
            stats: false,
        }
    }

    /// Resolve the output document against an already canonicalized root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        if self.output_file.is_absolute() {
            self.output_file.clone()
        } else {
            root.join(&self.output_file)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        ensure!(
            !self.output_file.as_os_str().is_empty(),
            Config,
            "Output file name must not be empty"
        );

        let output = self.output_path(&self.target_dir);
        if let Some(parent) = output.parent() {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }
}
