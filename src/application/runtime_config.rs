use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::ShellConfig;

/// Settings of one run: the config file overlaid with command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub user: String,
    /// `None` keeps the tree in memory only.
    pub state_file: Option<PathBuf>,
    pub autosave: bool,
    /// Lines to run instead of an interactive prompt.
    pub commands: Vec<String>,
}

impl RuntimeConfig {
    pub fn new(config: ShellConfig, cli: Cli) -> Self {
        Self {
            user: config.user,
            state_file: (!cli.no_persist).then_some(config.state_file),
            autosave: config.autosave,
            commands: cli.commands,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.commands.is_empty()
    }
}
