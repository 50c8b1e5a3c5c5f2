use clip_sort::organize::{ClipSortConfig, DEFAULT_PATTERN, FilePattern, OrganizeConfig};

use crate::Args;

/// Final config created from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub(crate) auto: bool,
    pub(crate) debug: bool,
    pub(crate) log: bool,
    pub(crate) organize: OrganizeConfig,
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed,
    /// or if the file pattern is invalid.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let user_config = ClipSortConfig::get_user_config()?;
        Self::from_args_and_user_config(args, user_config)
    }

    fn from_args_and_user_config(args: Args, user_config: ClipSortConfig) -> anyhow::Result<Self> {
        // args > config > default
        let pattern = args
            .pattern
            .filter(|pattern| !pattern.trim().is_empty())
            .or(user_config.pattern)
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());
        let pattern = FilePattern::new(&pattern, args.reverse || user_config.reverse)?;

        let extensions = if args.extension.is_empty() {
            OrganizeConfig::normalize_extensions(user_config.extensions)
        } else {
            OrganizeConfig::normalize_extensions(args.extension)
        };

        Ok(Self {
            auto: args.yes || user_config.auto,
            debug: args.debug || user_config.debug,
            log: args.log || user_config.log,
            organize: OrganizeConfig {
                ask_prefix: !args.no_ask && user_config.ask_prefix,
                confirm_merge: args.confirm_merge || user_config.confirm_merge,
                confirm_overwrite: args.confirm_overwrite || user_config.confirm_overwrite,
                copy: args.copy || user_config.copy,
                create_subdirectory: !args.in_place && user_config.create_subdirectory,
                dryrun: args.print || user_config.dryrun,
                extensions,
                pattern,
                verbose: args.verbose || user_config.verbose,
            },
        })
    }
}
