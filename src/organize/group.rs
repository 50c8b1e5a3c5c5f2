//! Directory indexing into recording groups.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::organize::FilePattern;

/// One file of a recording group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    /// Chapter as it appears in the file name, e.g. `"01"`.
    pub chapter: String,
    pub filename: String,
}

impl ChapterEntry {
    pub fn new(chapter: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            chapter: chapter.into(),
            filename: filename.into(),
        }
    }
}

/// Recording groups in the order they were first encountered.
///
/// Entries within a group keep the directory listing order.
#[derive(Debug, Default, Clone)]
pub struct GroupMap {
    groups: Vec<(String, Vec<ChapterEntry>)>,
    index: HashMap<String, usize>,
}

impl GroupMap {
    /// Group the given file names with the pattern.
    /// Names that don't match are left out.
    pub fn build<I, S>(filenames: I, pattern: &FilePattern) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups = Self::default();
        for filename in filenames {
            let filename = filename.as_ref();
            if let Some((chapter, group)) = pattern.match_name(filename) {
                groups.insert(group, ChapterEntry::new(chapter, filename));
            }
        }
        groups
    }

    /// Append an entry, creating the group on first use.
    pub fn insert(&mut self, group: String, entry: ChapterEntry) {
        if let Some(&position) = self.index.get(&group) {
            self.groups[position].1.push(entry);
        } else {
            self.index.insert(group.clone(), self.groups.len());
            self.groups.push((group, vec![entry]));
        }
    }

    #[must_use]
    pub fn get(&self, group: &str) -> Option<&[ChapterEntry]> {
        self.index.get(group).map(|&position| self.groups[position].1.as_slice())
    }

    /// Number of groups.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of files over all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ChapterEntry])> {
        self.groups
            .iter()
            .map(|(group, entries)| (group.as_str(), entries.as_slice()))
    }

    /// Highest numeric chapter in the given group.
    /// Chapters that are not numbers are ignored.
    #[must_use]
    pub fn max_chapter(&self, group: &str) -> Option<u64> {
        self.get(group)?
            .iter()
            .filter_map(|entry| entry.chapter.parse::<u64>().ok())
            .max()
    }
}

impl IntoIterator for GroupMap {
    type Item = (String, Vec<ChapterEntry>);
    type IntoIter = std::vec::IntoIter<(String, Vec<ChapterEntry>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// List file names directly inside `directory` that have one of the given extensions.
///
/// Extensions are compared case-insensitively. Subdirectories are not listed.
/// The order is the platform directory listing order.
pub fn list_video_files(directory: &Path, extensions: &[String]) -> io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let extension = crate::path_to_file_extension_string(path);
        if extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&extension)) {
            files.push(crate::path_to_filename_string(path));
        }
    }
    Ok(files)
}
