mod config;
mod logger;
mod prompt;

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;

use clip_sort::organize::{AutoDecisions, DecisionPort, Organizer, RunReport, RunStatus};
use clip_sort::{print_bold, print_error, print_warning};

use crate::config::Config;
use crate::logger::FileLogger;
use crate::prompt::TerminalPrompt;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Sort multi-file camera recordings into per-session directories"
)]
pub struct Args {
    /// Optional input directory
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Copy files instead of moving
    #[arg(short, long)]
    copy: bool,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Allowed file extension(s)
    #[arg(short, long, num_args = 1, action = clap::ArgAction::Append, value_name = "EXTENSION")]
    extension: Vec<String>,

    /// Regex with two capture groups: chapter and group
    #[arg(short = 'g', long, value_name = "REGEX")]
    pattern: Option<String>,

    /// Rename in the input directory without creating subdirectories
    #[arg(short, long)]
    in_place: bool,

    /// Write a log file of the run
    #[arg(short = 'L', long)]
    log: bool,

    /// Ask before adding files to an existing directory
    #[arg(short = 'm', long)]
    confirm_merge: bool,

    /// Use the group identifier as prefix without asking
    #[arg(short, long)]
    no_ask: bool,

    /// Ask before overwriting instead of numbering automatically
    #[arg(short = 'o', long)]
    confirm_overwrite: bool,

    /// Only print changes without moving files
    #[arg(short, long)]
    print: bool,

    /// Pattern captures group first and chapter second
    #[arg(short = 'R', long)]
    reverse: bool,

    /// Answer all prompts with the default
    #[arg(short, long)]
    yes: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        return clip_sort::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"));
    }

    let root = clip_sort::resolve_input_path(args.path.as_deref())?;
    let config = Config::from_args(args)?;
    let organizer = Organizer::new(root, config.organize)?;
    if config.debug {
        println!("{organizer}");
    }

    let mut logger = if config.log {
        let mut logger = FileLogger::new()?;
        logger.log_init(&organizer);
        Some(logger)
    } else {
        None
    };

    let mut port: Box<dyn DecisionPort> = if config.auto {
        Box::new(AutoDecisions)
    } else {
        Box::new(TerminalPrompt::stdio())
    };

    let report = organizer.run(port.as_mut()).context("Failed to organize recordings")?;
    if let Some(logger) = logger.as_mut() {
        logger.log_report(&report);
    }

    print_summary(&report, organizer.config().dryrun);
    if report.status() == RunStatus::CompletedWithErrors {
        anyhow::bail!("Completed with {} error(s)", report.diagnostics.len());
    }
    Ok(())
}

fn print_summary(report: &RunReport, dryrun: bool) {
    println!();
    let count = report.placed.len();
    let files = if count == 1 { "file" } else { "files" };
    if dryrun {
        println!("Dryrun: would have placed {count} {files}");
    } else {
        print_bold!("Placed {count} {files}");
    }

    if !report.skipped.is_empty() {
        print_warning!("Skipped {} existing file(s):", report.skipped.len());
        for source in &report.skipped {
            println!("  {}", source.display());
        }
    }
    for diagnostic in &report.diagnostics {
        print_error!("{diagnostic}");
    }
    match report.status() {
        RunStatus::Ok => println!("{}", "Done".green()),
        RunStatus::Cancelled => print_warning!("Cancelled by user"),
        RunStatus::CompletedWithErrors => {}
    }
}
