use std::path::PathBuf;

use clap::Parser;

use crate::error::CliError;

pub(crate) mod extra;

#[derive(Parser, Debug)]
#[clap(name = "Booru Poster", author, version, about, long_about = None)]
pub struct Cli {
    /// Append a new bot entry to config.json and exit.
    ///
    /// The entry is filled from the built-in template. Without a name, it is called `bot_<n>`.
    #[clap(
        long = "gen-config",
        value_name = "NAME",
        num_args = 0..=1,
        help_heading = "CONFIG"
    )]
    pub gen_config: Option<Option<String>>,

    /// Directory holding config.json and defaults.json
    ///
    /// Defaults to $BRP_CONFIG_DIR, or the user's config directory if unset.
    #[clap(long, value_name = "PATH", help_heading = "CONFIG")]
    pub config_dir: Option<PathBuf>,

    /// Only run the bots with these names. Can be given multiple times.
    #[clap(short, long = "bot", value_name = "NAME")]
    pub bots: Vec<String>,

    /// Append logs to this file instead of printing them to stderr
    #[clap(long, value_name = "PATH", help_heading = "LOGGING")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Resolves the configuration directory, creating it if needed.
    pub fn config_dir(&self) -> Result<PathBuf, CliError> {
        extra::resolve_config_dir(self.config_dir.as_deref())
    }

    /// Whether the bot called `name` should run.
    #[inline]
    pub fn is_selected(&self, name: &str) -> bool {
        self.bots.is_empty() || self.bots.iter().any(|b| b == name)
    }
}
