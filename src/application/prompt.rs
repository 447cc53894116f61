use colored::{ColoredString, Colorize};
use derive_more::Display;

use crate::commands::Session;

/// The interactive prompt, `user@termfs:location$ `.
#[derive(Debug, Display)]
#[display("{user}@termfs:{location}$ ")]
pub struct Prompt {
    user: ColoredString,
    location: ColoredString,
}

impl Prompt {
    pub fn new(session: &Session) -> Self {
        Self {
            user: session.user().green().bold(),
            location: abbreviate_home(session.cwd(), session.home())
                .as_str()
                .blue()
                .bold(),
        }
    }
}

/// Shows the home directory, and anything below it, relative to `~`.
pub fn abbreviate_home(cwd: &str, home: &str) -> String {
    match cwd.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => cwd.to_string(),
    }
}
