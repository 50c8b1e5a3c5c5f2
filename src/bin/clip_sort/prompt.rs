use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

use colored::Colorize;

use clip_sort::organize::{DecisionPort, OverwriteDecision, is_valid_prefix};

/// Asks the user for decisions in the terminal.
///
/// End of input is treated as cancel for the prefix question and as "no" for the others.
pub struct TerminalPrompt<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read one trimmed line, or `None` at end of input.
    fn read_answer(&mut self) -> Option<String> {
        let _ = self.writer.flush();
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> DecisionPort for TerminalPrompt<R, W> {
    fn ask_prefix(&mut self, group: &str, sample_path: &Path, default_value: &str) -> Option<String> {
        let _ = writeln!(
            self.writer,
            "{} {} {}",
            "Group".cyan(),
            group.bold(),
            format!("({})", sample_path.display()).dimmed()
        );
        loop {
            let _ = write!(
                self.writer,
                "  {} {} ",
                "Prefix".cyan(),
                format!("[press Enter for {default_value}]:").dimmed()
            );
            let answer = self.read_answer()?;
            if answer.is_empty() {
                return Some(default_value.to_string());
            }
            if is_valid_prefix(&answer) {
                return Some(answer);
            }
            let _ = writeln!(
                self.writer,
                "  {}",
                format!("Invalid prefix '{answer}': must be a plain file name").yellow()
            );
        }
    }

    fn ask_merge_existing(&mut self, path: &Path) -> bool {
        let _ = write!(
            self.writer,
            "{} ",
            format!("Directory {} already exists, add files to it? (y/n):", path.display()).magenta()
        );
        self.read_answer()
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn ask_overwrite(&mut self, existing_path: &Path, source_path: &Path) -> OverwriteDecision {
        let _ = writeln!(
            self.writer,
            "{} {}",
            "File already exists:".yellow(),
            existing_path.display()
        );
        let _ = write!(
            self.writer,
            "  {} {} ",
            format!("Overwrite with {}?", source_path.display()).magenta(),
            "(y = overwrite, s = skip, Enter = next free number):".dimmed()
        );
        let answer = self.read_answer().map(|answer| answer.to_lowercase());
        match answer.as_deref() {
            Some("y" | "yes") => OverwriteDecision::Overwrite,
            Some("s" | "skip") => OverwriteDecision::Skip,
            _ => OverwriteDecision::Renumber,
        }
    }
}
