mod shell_config;

pub use shell_config::{DEFAULT_CONFIG_FILE, ShellConfig, ShellConfigError};
