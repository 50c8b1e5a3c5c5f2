//! File placement on disk.

use std::fmt;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

/// How a file is placed at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Copy,
    Move,
}

/// A single file placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementAction {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub operation: Operation,
}

impl PlacementAction {
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf, operation: Operation) -> Self {
        Self {
            source,
            destination,
            operation,
        }
    }
}

impl Operation {
    #[must_use]
    pub const fn from_copy_flag(copy: bool) -> Self {
        if copy { Self::Copy } else { Self::Move }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Move => write!(f, "move"),
        }
    }
}

/// Copy or move the file.
///
/// An existing destination file is replaced.
pub fn execute(action: &PlacementAction) -> io::Result<()> {
    match action.operation {
        Operation::Copy => copy_with_times(&action.source, &action.destination),
        Operation::Move => move_file(&action.source, &action.destination),
    }
}

/// Copy file contents and permissions, then restore the access and modification times.
fn copy_with_times(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    fs::copy(source, destination)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    File::options().write(true).open(destination)?.set_times(times)
}

/// Rename the file, falling back to copy and delete across file systems.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Err(error) if error.kind() == io::ErrorKind::CrossesDevices => {
            copy_with_times(source, destination)?;
            fs::remove_file(source)
        }
        result => result,
    }
}
