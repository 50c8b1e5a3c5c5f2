//! Run driver: index, plan, resolve and place one group at a time.

use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;
use indicatif::ProgressBar;
#[cfg(not(test))]
use indicatif::ProgressStyle;

use crate::organize::resolver::ConflictResolver;
use crate::organize::workspace::Workspace;
use crate::organize::{
    DecisionPort, Diagnostic, DiagnosticKind, GroupMap, OrganizeConfig, OrganizeError, OrganizeResult,
    PlacementAction, PlanStep, PrefixCarry, Session, SessionPlanner, executor, group,
};
use crate::{print_bold, print_error, print_warning};

#[cfg(not(test))]
const PROGRESS_BAR_CHARS: &str = "=> ";
#[cfg(not(test))]
const PROGRESS_BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:60.cyan/blue} {pos}/{len} {msg}";

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    Cancelled,
    CompletedWithErrors,
}

/// What a run did.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Placements that were done, or would be done in a dry run.
    pub placed: Vec<PlacementAction>,
    /// Source files left in place at the user's request.
    pub skipped: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    pub cancelled: bool,
}

impl RunReport {
    /// Cancellation takes precedence over errors.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        if self.cancelled {
            RunStatus::Cancelled
        } else if self.diagnostics.is_empty() {
            RunStatus::Ok
        } else {
            RunStatus::CompletedWithErrors
        }
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::Cancelled => "cancelled",
            Self::CompletedWithErrors => "completed with errors",
        };
        write!(f, "{name}")
    }
}

/// Sorts recordings in a directory into per-session names and directories.
#[derive(Debug)]
pub struct Organizer {
    root: PathBuf,
    config: OrganizeConfig,
}

impl Organizer {
    /// Create an organizer for an existing directory.
    ///
    /// # Errors
    /// Returns [`OrganizeError::NotFound`] or [`OrganizeError::NotADirectory`] for an invalid path.
    pub fn new(root: PathBuf, config: OrganizeConfig) -> OrganizeResult<Self> {
        if !root.exists() {
            return Err(OrganizeError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(OrganizeError::NotADirectory(root));
        }
        Ok(Self { root, config })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &OrganizeConfig {
        &self.config
    }

    /// Group the matching video files in the root directory.
    ///
    /// # Errors
    /// Returns [`OrganizeError::NoMatchingFiles`] if nothing matched,
    /// or an I/O error if the directory cannot be read.
    pub fn index(&self) -> OrganizeResult<GroupMap> {
        let files = group::list_video_files(&self.root, &self.config.extensions)?;
        let groups = GroupMap::build(files, &self.config.pattern);
        if groups.is_empty() {
            return Err(OrganizeError::NoMatchingFiles(self.root.clone()));
        }
        Ok(groups)
    }

    /// Organize all groups in discovery order.
    ///
    /// Each group is fully placed before the next one is planned.
    /// Group and file level problems are collected in the report,
    /// a cancelled prefix prompt stops the run.
    ///
    /// # Errors
    /// Returns an error only for invalid input, before anything is changed.
    pub fn run(&self, port: &mut dyn DecisionPort) -> OrganizeResult<RunReport> {
        let groups = self.index()?;
        print_bold!(
            "Found {} group(s) with {} file(s) in {}",
            groups.len(),
            groups.file_count(),
            self.root.display()
        );

        let planner = SessionPlanner::new(&self.root, &self.config);
        let resolver = ConflictResolver::new(&self.root, &self.config);
        let mut workspace = Workspace::new(self.config.dryrun);
        let mut carry = PrefixCarry::default();
        let mut report = RunReport::default();

        for (group, entries) in groups {
            match planner.plan_group(group, entries, &mut carry, &mut workspace, port) {
                PlanStep::Cancelled => {
                    print_warning!("Cancelled, remaining groups were not processed");
                    report.cancelled = true;
                    break;
                }
                PlanStep::Skipped(diagnostic) => {
                    print_warning!("Skipping group {}: {}", diagnostic.group, diagnostic.message);
                    report.diagnostics.push(diagnostic);
                }
                PlanStep::Planned(session) => {
                    self.print_session_header(&session);
                    let resolution = resolver.resolve(&session, &mut workspace, port);
                    self.place(&session, resolution.actions, &mut workspace, &mut report);
                    report.skipped.extend(resolution.skipped);
                    if let Some(diagnostic) = resolution.conflict {
                        print_error!("{}", diagnostic.message);
                        report.diagnostics.push(diagnostic);
                    }
                }
            }
        }

        Ok(report)
    }

    /// Execute the placements of one session, continuing past failed files.
    fn place(
        &self,
        session: &Session,
        actions: Vec<PlacementAction>,
        workspace: &mut Workspace,
        report: &mut RunReport,
    ) {
        let show_names = self.config.dryrun || self.config.verbose;
        let progress_bar = if show_names {
            ProgressBar::hidden()
        } else {
            Self::create_progress_bar(actions.len() as u64)
        };

        for action in actions {
            if show_names {
                self.print_action(&action);
            }
            if self.config.dryrun {
                report.placed.push(action);
                continue;
            }

            progress_bar.set_message(crate::path_to_filename_string(&action.destination));
            match executor::execute(&action) {
                Ok(()) => report.placed.push(action),
                Err(error) => {
                    let message = format!(
                        "Failed to {} {} to {}: {error}",
                        action.operation,
                        action.source.display(),
                        action.destination.display()
                    );
                    progress_bar.suspend(|| print_error!("{message}"));
                    workspace.release(&action.source, &action.destination);
                    report
                        .diagnostics
                        .push(Diagnostic::new(&session.group, DiagnosticKind::IoFailure, message));
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();
    }

    fn print_session_header(&self, session: &Session) {
        let destination = crate::get_relative_path_or_filename(&session.destination, &self.root);
        println!(
            "{}: {} file(s) {} {}",
            session.group.cyan().bold(),
            session.entries.len(),
            "→".green(),
            if session.destination == self.root {
                ".".to_string()
            } else {
                format!("{destination}/")
            }
        );
    }

    fn print_action(&self, action: &PlacementAction) {
        let source = crate::path_to_filename_string(&action.source);
        let destination = crate::get_relative_path_or_filename(&action.destination, &self.root);
        let heading = if self.config.dryrun {
            "Dryrun:".cyan().bold()
        } else if action.operation == executor::Operation::Copy {
            "Copy:".magenta().bold()
        } else {
            "Move:".magenta().bold()
        };
        println!("{heading}");
        crate::show_diff(&source, &destination);
        if action.destination.is_file() {
            if self.config.dryrun {
                print_warning!("Would overwrite existing file");
            } else {
                print_warning!("Overwriting existing file");
            }
        }
    }

    /// Create a progress bar that is hidden during tests.
    fn create_progress_bar(len: u64) -> ProgressBar {
        #[cfg(test)]
        {
            let _ = len;
            ProgressBar::hidden()
        }
        #[cfg(not(test))]
        {
            let progress_bar = ProgressBar::new(len);
            progress_bar.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_BAR_TEMPLATE)
                    .expect("Failed to set progress bar template")
                    .progress_chars(PROGRESS_BAR_CHARS),
            );
            progress_bar
        }
    }
}

impl fmt::Display for Organizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root: {}", self.root.display())?;
        write!(f, "{}", self.config)
    }
}
