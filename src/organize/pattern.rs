//! Chapter and group extraction from file names.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::organize::{OrganizeError, OrganizeResult};

/// Default pattern for camera file names like `GH010023.MP4`:
/// two-digit chapter followed by the file number that identifies the recording.
pub const DEFAULT_PATTERN: &str = r"G[A-Z]([0-9][0-9])([0-9]+)";

static RE_DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&anchored(DEFAULT_PATTERN)).expect("Failed to create default file pattern regex"));

/// Two-capture pattern that splits a file name into chapter and group.
///
/// The first capture is the chapter and the second the group,
/// unless `reversed` is set in which case the roles are swapped.
#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
    source: String,
    reversed: bool,
}

impl FilePattern {
    /// Compile a user supplied pattern.
    ///
    /// The pattern only needs to match the start of a file name.
    ///
    /// # Errors
    /// Returns [`OrganizeError::InvalidPattern`] if the regex does not compile
    /// or does not contain exactly two capture groups.
    pub fn new(pattern: &str, reversed: bool) -> OrganizeResult<Self> {
        let regex = Regex::new(&anchored(pattern)).map_err(|error| OrganizeError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: error.to_string(),
        })?;

        // Capture group zero is the whole match
        let captures = regex.captures_len() - 1;
        if captures != 2 {
            return Err(OrganizeError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("expected 2 capture groups, found {captures}"),
            });
        }

        Ok(Self {
            regex,
            source: pattern.to_string(),
            reversed,
        })
    }

    /// Pattern for files already named `{prefix}_{number}` in a destination directory.
    ///
    /// The prefix is captured first, so the roles are reversed
    /// to get the number back as the chapter.
    ///
    /// # Errors
    /// Returns an error if the escaped prefix produces a regex that is too large.
    pub fn destination(prefix: &str) -> OrganizeResult<Self> {
        let pattern = format!(r"({})_([0-9]+)\.", regex::escape(prefix));
        Self::new(&pattern, true)
    }

    /// Extract `(chapter, group)` from the start of the file name.
    ///
    /// ```rust
    /// use clip_sort::organize::FilePattern;
    ///
    /// let pattern = FilePattern::default();
    /// let (chapter, group) = pattern.match_name("GH010023.MP4").unwrap();
    /// assert_eq!(chapter, "01");
    /// assert_eq!(group, "0023");
    /// assert!(pattern.match_name("IMG_0001.MP4").is_none());
    /// ```
    #[must_use]
    pub fn match_name(&self, filename: &str) -> Option<(String, String)> {
        let captures = self.regex.captures(filename)?;
        let first = captures.get(1)?.as_str().to_string();
        let second = captures.get(2)?.as_str().to_string();
        if self.reversed {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        Self {
            regex: RE_DEFAULT_PATTERN.clone(),
            source: DEFAULT_PATTERN.to_string(),
            reversed: false,
        }
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            write!(f, "{} (reversed)", self.source)
        } else {
            write!(f, "{}", self.source)
        }
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})")
}
