use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "A shell over a persistent virtual file system")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// The YAML configuration file
    #[clap(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Where the file system is saved, overriding the configuration
    #[clap(long)]
    pub state_file: Option<PathBuf>,

    /// The user to log in as, overriding the configuration
    #[clap(long, short)]
    pub user: Option<String>,

    /// Keep every change in memory and never touch the state file
    #[clap(long)]
    pub no_persist: bool,

    /// Run this command line and exit instead of starting a prompt (repeatable)
    #[clap(long = "command", short = 'c', value_name = "LINE")]
    pub commands: Vec<String>,
}
