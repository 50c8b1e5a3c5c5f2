//! Prefix and destination planning for each recording group.

use std::path::{Path, PathBuf};

use crate::organize::workspace::{DirectoryStatus, Workspace};
use crate::organize::{ChapterEntry, DecisionPort, Diagnostic, DiagnosticKind, OrganizeConfig};

/// One group ready for conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub group: String,
    pub prefix: String,
    pub destination: PathBuf,
    pub entries: Vec<ChapterEntry>,
}

/// Outcome of planning a single group.
#[derive(Debug)]
pub enum PlanStep {
    Planned(Session),
    Skipped(Diagnostic),
    Cancelled,
}

/// Prefix carried from one group to the next.
///
/// Set when the user picked a prefix other than the group identifier,
/// so that the next group is offered the same series name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrefixCarry(Option<String>);

impl PrefixCarry {
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Check that a prefix can be used as a single directory and file name component.
#[must_use]
pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && !prefix.contains(['/', '\\']) && prefix != "." && prefix != ".."
}

#[derive(Debug)]
pub struct SessionPlanner<'a> {
    directory: &'a Path,
    config: &'a OrganizeConfig,
}

impl<'a> SessionPlanner<'a> {
    #[must_use]
    pub const fn new(directory: &'a Path, config: &'a OrganizeConfig) -> Self {
        Self { directory, config }
    }

    /// Resolve prefix and destination directory for one group.
    ///
    /// Creates the destination directory when subdirectories are enabled.
    pub fn plan_group(
        &self,
        group: String,
        entries: Vec<ChapterEntry>,
        carry: &mut PrefixCarry,
        workspace: &mut Workspace,
        port: &mut dyn DecisionPort,
    ) -> PlanStep {
        let Some(prefix) = self.resolve_prefix(&group, &entries, carry, port) else {
            return PlanStep::Cancelled;
        };
        if !is_valid_prefix(&prefix) {
            return PlanStep::Skipped(Diagnostic::new(
                &group,
                DiagnosticKind::InvalidPrefix,
                format!("Prefix '{prefix}' must be a plain file name"),
            ));
        }
        if self.config.ask_prefix {
            carry.0 = (prefix != group).then(|| prefix.clone());
        }

        match self.resolve_destination(&group, &prefix, workspace, port) {
            Ok(destination) => PlanStep::Planned(Session {
                group,
                prefix,
                destination,
                entries,
            }),
            Err(diagnostic) => PlanStep::Skipped(diagnostic),
        }
    }

    /// Get the prefix for a group, asking the user when enabled.
    /// Returns `None` if the user cancelled.
    fn resolve_prefix(
        &self,
        group: &str,
        entries: &[ChapterEntry],
        carry: &PrefixCarry,
        port: &mut dyn DecisionPort,
    ) -> Option<String> {
        if !self.config.ask_prefix {
            return Some(group.to_string());
        }

        let default_value = carry.previous().unwrap_or(group).to_string();
        let sample_path = entries
            .first()
            .map_or_else(|| self.directory.to_path_buf(), |entry| self.directory.join(&entry.filename));

        port
            .ask_prefix(group, &sample_path, &default_value)
            .map(|answer| crate::normalize_name(answer.trim()))
            .filter(|answer| !answer.is_empty())
    }

    fn resolve_destination(
        &self,
        group: &str,
        prefix: &str,
        workspace: &mut Workspace,
        port: &mut dyn DecisionPort,
    ) -> Result<PathBuf, Diagnostic> {
        if !self.config.create_subdirectory {
            return Ok(self.directory.to_path_buf());
        }

        let destination = self.directory.join(prefix);
        match workspace.create_dir(&destination) {
            DirectoryStatus::Created => {
                if self.config.verbose {
                    println!("Created directory: {}", crate::path_to_filename_string(&destination));
                }
                Ok(destination)
            }
            DirectoryStatus::AlreadyExists => {
                if self.config.confirm_merge && !port.ask_merge_existing(&destination) {
                    return Err(Diagnostic::new(
                        group,
                        DiagnosticKind::DirectoryConflict,
                        format!("Merge into existing directory {} declined", destination.display()),
                    ));
                }
                Ok(destination)
            }
            DirectoryStatus::Failed(error) => Err(Diagnostic::new(
                group,
                DiagnosticKind::IoFailure,
                format!("Failed to create directory {}: {error}", destination.display()),
            )),
        }
    }
}
