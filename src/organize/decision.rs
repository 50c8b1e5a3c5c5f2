//! User decisions requested while organizing.

use std::path::Path;

/// Answer to a destination file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// Replace the existing file.
    Overwrite,
    /// Keep the existing file and continue numbering after the highest chapter.
    Renumber,
    /// Leave this source file where it is.
    Skip,
}

/// Source of decisions for the organizer.
///
/// Calls are blocking: the organizer waits for each answer before continuing.
pub trait DecisionPort {
    /// Ask for the file name prefix of a group.
    ///
    /// Returns `None` when the user cancels, which stops the whole run.
    fn ask_prefix(&mut self, group: &str, sample_path: &Path, default_value: &str) -> Option<String>;

    /// Ask whether files may be added to an existing directory.
    fn ask_merge_existing(&mut self, path: &Path) -> bool;

    /// Ask what to do when the destination file already exists.
    fn ask_overwrite(&mut self, existing_path: &Path, source_path: &Path) -> OverwriteDecision;
}

/// Answers every question without user interaction:
/// default prefix, merge into existing directories, renumber on conflicts.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoDecisions;

impl DecisionPort for AutoDecisions {
    fn ask_prefix(&mut self, _group: &str, _sample_path: &Path, default_value: &str) -> Option<String> {
        Some(default_value.to_string())
    }

    fn ask_merge_existing(&mut self, _path: &Path) -> bool {
        true
    }

    fn ask_overwrite(&mut self, _existing_path: &Path, _source_path: &Path) -> OverwriteDecision {
        OverwriteDecision::Renumber
    }
}
