use std::io::{self, BufRead, Write};

use colored::Colorize;
use snafu::ResultExt;
use tracing::{debug, error};

use crate::application::application::{ApplicationError, SaveSnafu, TerminalSnafu};
use crate::application::prompt::Prompt;
use crate::commands::{CLEAR_SCREEN, CommandOutput, Session};
use crate::persistence::SnapshotStore;

/// Drives a session from the terminal or from a list of lines, and keeps the
/// saved snapshot in step with it.
pub struct Shell {
    session: Session,
    store: Option<SnapshotStore>,
    autosave: bool,
    dirty: bool,
}

impl Shell {
    pub fn new(session: Session, store: Option<SnapshotStore>, autosave: bool) -> Self {
        Self {
            session,
            store,
            autosave,
            dirty: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs lines in order until one of them exits.
    pub async fn run_lines(&mut self, lines: &[String]) {
        for line in lines {
            if self.execute(line).await {
                break;
            }
        }
    }

    /// Prompts for lines on stdin until `exit` or end of input.
    pub async fn interactive(&mut self) -> Result<(), ApplicationError> {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("{}", Prompt::new(&self.session));
            io::stdout().flush().context(TerminalSnafu)?;

            line.clear();
            if stdin.lock().read_line(&mut line).context(TerminalSnafu)? == 0 {
                println!();
                return Ok(());
            }
            if self.execute(&line).await {
                return Ok(());
            }
        }
    }

    /// Saves anything autosave did not get to.
    pub async fn finish(self) -> Result<(), ApplicationError> {
        match &self.store {
            Some(store) if self.dirty => store
                .save(&self.session.tree().snapshot())
                .await
                .context(SaveSnafu),
            _ => Ok(()),
        }
    }

    /// Returns whether the line asked to leave the shell.
    async fn execute(&mut self, line: &str) -> bool {
        match self.session.execute(line) {
            Ok(output) => {
                print_output(&output);
                if output.modified {
                    self.dirty = true;
                    if self.autosave {
                        self.autosave().await;
                    }
                }
                output.exit
            }
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                false
            }
        }
    }

    async fn autosave(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.save(&self.session.tree().snapshot()).await {
            Ok(()) => {
                debug!("Autosaved file system to {}", store.path().display());
                self.dirty = false;
            }
            Err(err) => error!("Failed to autosave file system: {}", snafu::Report::from_error(err)),
        }
    }
}

fn print_output(output: &CommandOutput) {
    if output.text == CLEAR_SCREEN {
        print!("{CLEAR_SCREEN}");
    } else if !output.text.is_empty() {
        println!("{}", output.text);
    }
}
