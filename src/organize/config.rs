//! Configuration for organizing recordings.

use std::{fmt, fs};

use anyhow::Context;
use itertools::Itertools;
use serde::Deserialize;

use crate::organize::FilePattern;

/// Video file extensions used when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 1] = ["mp4"];

/// Config from the user config file.
#[derive(Debug, Deserialize)]
pub struct ClipSortConfig {
    #[serde(default = "default_true")]
    pub ask_prefix: bool,
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub confirm_merge: bool,
    #[serde(default)]
    pub confirm_overwrite: bool,
    #[serde(default)]
    pub copy: bool,
    #[serde(default = "default_true")]
    pub create_subdirectory: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dryrun: bool,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub log: bool,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub verbose: bool,
}

/// Wrapper needed for parsing the config section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    clipsort: ClipSortConfig,
}

/// Final config for one organize run.
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    /// Ask for a custom prefix for each group.
    pub ask_prefix: bool,
    /// Ask before adding files to an existing directory.
    pub confirm_merge: bool,
    /// Ask before overwriting, instead of renumbering automatically.
    pub confirm_overwrite: bool,
    /// Copy files instead of moving them.
    pub copy: bool,
    /// Put each group into its own subdirectory.
    pub create_subdirectory: bool,
    pub dryrun: bool,
    /// Allowed file extensions in lowercase, without the leading dot.
    pub extensions: Vec<String>,
    pub pattern: FilePattern,
    pub verbose: bool,
}

impl Default for ClipSortConfig {
    fn default() -> Self {
        Self {
            ask_prefix: true,
            auto: false,
            confirm_merge: false,
            confirm_overwrite: false,
            copy: false,
            create_subdirectory: true,
            debug: false,
            dryrun: false,
            extensions: Vec::new(),
            log: false,
            pattern: None,
            reverse: false,
            verbose: false,
        }
    }
}

impl ClipSortConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = crate::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.clipsort)
            .context("Failed to parse clipsort config TOML")
    }
}

impl OrganizeConfig {
    /// Normalize extensions to lowercase without a leading dot, dropping empty and duplicate values.
    ///
    /// Falls back to [`DEFAULT_EXTENSIONS`] when nothing is left.
    #[must_use]
    pub fn normalize_extensions<I, S>(extensions: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = extensions
            .into_iter()
            .map(|extension| extension.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|extension| !extension.is_empty())
            .unique()
            .collect();
        if normalized.is_empty() {
            normalized = DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect();
        }
        normalized
    }
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            ask_prefix: true,
            confirm_merge: false,
            confirm_overwrite: false,
            copy: false,
            create_subdirectory: true,
            dryrun: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            pattern: FilePattern::default(),
            verbose: false,
        }
    }
}

impl fmt::Display for OrganizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  ask prefix:        {}", crate::colorize_bool(self.ask_prefix))?;
        writeln!(f, "  confirm merge:     {}", crate::colorize_bool(self.confirm_merge))?;
        writeln!(f, "  confirm overwrite: {}", crate::colorize_bool(self.confirm_overwrite))?;
        writeln!(f, "  copy:              {}", crate::colorize_bool(self.copy))?;
        writeln!(
            f,
            "  subdirectory:      {}",
            crate::colorize_bool(self.create_subdirectory)
        )?;
        writeln!(f, "  dryrun:            {}", crate::colorize_bool(self.dryrun))?;
        writeln!(f, "  verbose:           {}", crate::colorize_bool(self.verbose))?;
        writeln!(f, "  extensions:        {}", self.extensions.join(", "))?;
        write!(f, "  pattern:           {}", self.pattern)
    }
}

const fn default_true() -> bool {
    true
}
