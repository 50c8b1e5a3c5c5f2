//! Destination file names and collision handling.

use std::path::{Path, PathBuf};

use crate::organize::workspace::Workspace;
use crate::organize::{
    ChapterEntry, DecisionPort, Diagnostic, DiagnosticKind, FilePattern, GroupMap, Operation, OrganizeConfig,
    OverwriteDecision, PlacementAction, Session,
};

/// Placements for one session.
#[derive(Debug, Default)]
pub struct Resolution {
    pub actions: Vec<PlacementAction>,
    /// Source files the user chose to leave in place.
    pub skipped: Vec<PathBuf>,
    /// Set when the remaining files of the session could not be named.
    pub conflict: Option<Diagnostic>,
}

#[derive(Debug)]
pub struct ConflictResolver<'a> {
    directory: &'a Path,
    config: &'a OrganizeConfig,
}

impl<'a> ConflictResolver<'a> {
    #[must_use]
    pub const fn new(directory: &'a Path, config: &'a OrganizeConfig) -> Self {
        Self { directory, config }
    }

    /// Pick a free destination for every file in the session.
    ///
    /// Once a collision forces renumbering, the rest of the session continues
    /// from the highest chapter already in the destination.
    /// Files planned before that keep their own chapter.
    pub fn resolve(&self, session: &Session, workspace: &mut Workspace, port: &mut dyn DecisionPort) -> Resolution {
        let operation = Operation::from_copy_flag(self.config.copy);
        let mut resolution = Resolution::default();
        let mut counter: Option<u64> = None;

        for (index, entry) in session.entries.iter().enumerate() {
            let source = self.directory.join(&entry.filename);
            let mut destination = session
                .destination
                .join(target_name(&session.prefix, entry, counter, &source));

            if destination == source {
                if self.config.verbose {
                    println!("Already in place: {}", entry.filename);
                }
                continue;
            }

            if workspace.exists(&destination) {
                let decision = if self.config.confirm_overwrite {
                    port.ask_overwrite(&destination, &source)
                } else {
                    OverwriteDecision::Renumber
                };

                match decision {
                    OverwriteDecision::Skip => {
                        if self.config.verbose {
                            println!("Skipping file: {}", entry.filename);
                        }
                        resolution.skipped.push(source);
                        continue;
                    }
                    OverwriteDecision::Overwrite => {}
                    OverwriteDecision::Renumber => {
                        let next = match self.next_free_chapter(session, workspace) {
                            Ok(next) => next,
                            Err(diagnostic) => {
                                resolution.conflict = Some(diagnostic);
                                break;
                            }
                        };
                        counter = Some(next);
                        destination = session
                            .destination
                            .join(target_name(&session.prefix, entry, counter, &source));

                        if workspace.exists(&destination) {
                            resolution.conflict = Some(Diagnostic::new(
                                &session.group,
                                DiagnosticKind::UnresolvableNameConflict,
                                format!(
                                    "Renumbered destination {} already exists, skipping remaining files",
                                    destination.display()
                                ),
                            ));
                            break;
                        }
                    }
                }
            }

            workspace.claim(&source, &destination, operation == Operation::Move);
            resolution
                .actions
                .push(PlacementAction::new(source, destination, operation));

            if let Some(value) = counter {
                counter = value.checked_add(1);
                if counter.is_none() && index + 1 < session.entries.len() {
                    resolution.conflict = Some(counter_exhausted(session));
                    break;
                }
            }
        }

        resolution
    }

    /// Highest chapter already named with the session prefix, plus one.
    fn next_free_chapter(&self, session: &Session, workspace: &Workspace) -> Result<u64, Diagnostic> {
        let pattern = FilePattern::destination(&session.prefix).map_err(|error| {
            Diagnostic::new(
                &session.group,
                DiagnosticKind::UnresolvableNameConflict,
                error.to_string(),
            )
        })?;

        let files = workspace
            .list_video_files(&session.destination, &self.config.extensions)
            .map_err(|error| {
                Diagnostic::new(
                    &session.group,
                    DiagnosticKind::IoFailure,
                    format!("Failed to read directory {}: {error}", session.destination.display()),
                )
            })?;

        let files = files.iter().map(|name| crate::normalize_name(name));
        let max = GroupMap::build(files, &pattern)
            .max_chapter(&session.prefix)
            .ok_or_else(|| {
                Diagnostic::new(
                    &session.group,
                    DiagnosticKind::UnresolvableNameConflict,
                    format!(
                        "No numbered '{}' files found in {} to continue from",
                        session.prefix,
                        session.destination.display()
                    ),
                )
            })?;
        max.checked_add(1).ok_or_else(|| counter_exhausted(session))
    }
}

fn counter_exhausted(session: &Session) -> Diagnostic {
    Diagnostic::new(
        &session.group,
        DiagnosticKind::UnresolvableNameConflict,
        format!(
            "No chapter number left after {} in {}, skipping remaining files",
            u64::MAX,
            session.destination.display()
        ),
    )
}

/// Build `{prefix}_{chapter}.{EXT}` with the source extension in uppercase.
///
/// A running counter replaces the entry chapter as a plain number.
fn target_name(prefix: &str, entry: &ChapterEntry, counter: Option<u64>, source: &Path) -> String {
    let chapter = counter.map_or_else(|| entry.chapter.clone(), |value| value.to_string());
    let extension = crate::path_to_file_extension_string(source).to_uppercase();
    if extension.is_empty() {
        format!("{prefix}_{chapter}")
    } else {
        format!("{prefix}_{chapter}.{extension}")
    }
}
