//! File system view used while planning placements.
//!
//! Destinations planned earlier in the run are tracked on top of what is on disk,
//! so a dry run answers existence checks the same way a real run would.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::organize::group;

/// Result of creating a destination directory.
#[derive(Debug)]
pub enum DirectoryStatus {
    Created,
    AlreadyExists,
    Failed(io::Error),
}

#[derive(Debug, Default)]
pub struct Workspace {
    dryrun: bool,
    /// Directories that would have been created in a dry run.
    created: HashSet<PathBuf>,
    /// Destinations of planned placements.
    claimed: HashSet<PathBuf>,
    /// Sources of planned moves.
    vacated: HashSet<PathBuf>,
}

impl Workspace {
    #[must_use]
    pub fn new(dryrun: bool) -> Self {
        Self {
            dryrun,
            ..Self::default()
        }
    }

    /// Create a directory, reporting an existing one separately from other failures.
    pub fn create_dir(&mut self, path: &Path) -> DirectoryStatus {
        if self.dryrun {
            if path.is_dir() || self.created.contains(path) {
                return DirectoryStatus::AlreadyExists;
            }
            if path.exists() {
                return DirectoryStatus::Failed(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "a file with the same name exists",
                ));
            }
            self.created.insert(path.to_path_buf());
            return DirectoryStatus::Created;
        }

        match fs::create_dir(path) {
            Ok(()) => DirectoryStatus::Created,
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
                DirectoryStatus::AlreadyExists
            }
            Err(error) => DirectoryStatus::Failed(error),
        }
    }

    /// Check if the path exists on disk or has been claimed by a planned placement.
    #[must_use]
    pub fn exists(&self, path: &Path) -> bool {
        self.claimed.contains(path) || (!self.vacated.contains(path) && path.exists())
    }

    /// Record a planned placement.
    pub fn claim(&mut self, source: &Path, destination: &Path, is_move: bool) {
        self.claimed.insert(destination.to_path_buf());
        if is_move {
            self.vacated.insert(source.to_path_buf());
        }
    }

    /// Undo a claim after the placement failed.
    pub fn release(&mut self, source: &Path, destination: &Path) {
        self.claimed.remove(destination);
        self.vacated.remove(source);
    }

    /// List allowed video files in a directory, as they will be once
    /// the planned placements are done. Always reads the directory again.
    pub fn list_video_files(&self, directory: &Path, extensions: &[String]) -> io::Result<Vec<String>> {
        let mut files = if directory.is_dir() {
            group::list_video_files(directory, extensions)?
        } else {
            Vec::new()
        };
        files.retain(|name| !self.vacated.contains(&directory.join(name)));

        let mut planned: Vec<String> = self
            .claimed
            .iter()
            .filter(|path| path.parent() == Some(directory))
            .map(|path| crate::path_to_filename_string(path))
            .filter(|name| !files.contains(name))
            .collect();
        planned.sort_unstable();
        files.extend(planned);
        Ok(files)
    }
}
