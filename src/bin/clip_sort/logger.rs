use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use clip_sort::config::LOG_DIR;
use clip_sort::organize::{Organizer, RunReport};

/// Simple file logger for organize runs with buffered writes
pub struct FileLogger {
    writer: BufWriter<File>,
}

impl FileLogger {
    /// Create a new file logger, writing to ~/logs/clip-sort/clipsort_<timestamp>.log
    pub(crate) fn new() -> Result<Self> {
        let log_dir = LOG_DIR.as_deref().context("Failed to get home directory")?;
        if !log_dir.exists() {
            fs::create_dir_all(log_dir).context("Failed to create log directory")?;
        }

        let log_path = log_dir.join(format!("clipsort_{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S")));
        Self::open(&log_path)
    }

    /// Open a logger that appends to the given file.
    pub(crate) fn open(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Log when starting the program
    pub(crate) fn log_init(&mut self, organizer: &Organizer) {
        let config = organizer.config();
        let _ = writeln!(
            self.writer,
            "[{}] INIT \"{}\"",
            Self::timestamp(),
            organizer.root().display()
        );
        let _ = writeln!(self.writer, "  pattern: {}", config.pattern);
        let _ = writeln!(self.writer, "  extensions: {:?}", config.extensions);
        let _ = writeln!(self.writer, "  ask_prefix: {}", config.ask_prefix);
        let _ = writeln!(self.writer, "  create_subdirectory: {}", config.create_subdirectory);
        let _ = writeln!(self.writer, "  confirm_merge: {}", config.confirm_merge);
        let _ = writeln!(self.writer, "  confirm_overwrite: {}", config.confirm_overwrite);
        let _ = writeln!(self.writer, "  copy: {}", config.copy);
        let _ = writeln!(self.writer, "  dryrun: {}", config.dryrun);
        let _ = self.writer.flush();
    }

    /// Log every placement and diagnostic of a finished run
    pub(crate) fn log_report(&mut self, report: &RunReport) {
        let timestamp = Self::timestamp();
        for action in &report.placed {
            let _ = writeln!(
                self.writer,
                "[{timestamp}] {} \"{}\" -> \"{}\"",
                action.operation.to_string().to_uppercase(),
                action.source.display(),
                action.destination.display()
            );
        }
        for source in &report.skipped {
            let _ = writeln!(self.writer, "[{timestamp}] SKIP \"{}\"", source.display());
        }
        for diagnostic in &report.diagnostics {
            let _ = writeln!(self.writer, "[{timestamp}] ERROR {diagnostic}");
        }
        let _ = writeln!(
            self.writer,
            "[{timestamp}] DONE {} | placed: {}, skipped: {}, errors: {}",
            report.status(),
            report.placed.len(),
            report.skipped.len(),
            report.diagnostics.len()
        );
        let _ = self.writer.flush();
    }
}
