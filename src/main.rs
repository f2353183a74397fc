/*!
 * Command-line interface for repo-export
 */

use std::fs;
use std::io::{self, IsTerminal};
use std::process;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use repo_export::clipboard::copy_to_clipboard;
use repo_export::config::{Args, Config};
use repo_export::error::Result;
use repo_export::exporter::Exporter;
use repo_export::report::{ReportFormat, Reporter};

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let bin_name = command.get_name().to_string();
        generate(shell, &mut command, bin_name, &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);
    let quiet = args.quiet;

    if let Err(e) = run(Config::from_args(args), quiet) {
        log::debug!("Export failed: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
    {
        progress.set_style(style);
    }
    progress.set_prefix("Exporting");
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

fn run(config: Config, quiet: bool) -> Result<()> {
    config.validate()?;

    let progress = progress_bar(quiet);
    let exporter = Exporter::new(config.clone(), progress.clone());
    let summary = exporter.run()?;
    progress.finish_and_clear();

    if config.clip {
        let document = fs::read_to_string(&summary.output_file)?;
        match copy_to_clipboard(&document) {
            Ok(()) => log::info!("Copied export to clipboard"),
            Err(e) => log::warn!("Failed to copy to clipboard: {}", e),
        }
    }

    if config.stats {
        Reporter::new(ReportFormat::ConsoleTable).print_report(&summary);
    }

    println!("{}", summary.output_file.display());

    Ok(())
}
