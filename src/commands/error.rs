use snafu::Snafu;

use crate::filesystem::FilesystemError;

/// A failed command line. The `Display` form is the line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum CommandError {
    #[snafu(display("{name}: command not found"))]
    UnknownCommand { name: String },
    #[snafu(display("{command}: missing operand"))]
    MissingOperand { command: &'static str },
    #[snafu(display("{command}: missing file operand"))]
    MissingFileOperand { command: &'static str },
    #[snafu(display("{command}: extra operand '{operand}'"))]
    ExtraOperand {
        command: &'static str,
        operand: String,
    },
    #[snafu(display("{command}: invalid argument"))]
    InvalidArgument { command: &'static str },
    #[snafu(display("syntax error: unterminated quoted string"))]
    UnterminatedQuote,
    #[snafu(display("syntax error near unexpected token `{token}'"))]
    UnexpectedToken { token: String },
    #[snafu(display("grep: invalid regular expression: {message}"))]
    InvalidPattern { message: String },
    #[snafu(display("{command}: Permission denied. Only root can {action} users."))]
    PermissionDenied {
        command: &'static str,
        action: &'static str,
    },
    #[snafu(display(
        "useradd: invalid username. Username must start with a letter or underscore and contain only letters, numbers, underscores, or hyphens."
    ))]
    InvalidUserName,
    #[snafu(display("useradd: user '{user}' already exists"))]
    UserExists { user: String },
    #[snafu(display("{command}: user '{user}' does not exist"))]
    UnknownUser { command: &'static str, user: String },
    #[snafu(display("useradd: /home directory does not exist"))]
    MissingHomeRoot,
    #[snafu(display("useradd: home directory for user '{user}' already exists"))]
    HomeExists { user: String },
    #[snafu(display("userdel: cannot delete root user"))]
    DeleteRoot,
    #[snafu(display("userdel: cannot delete the current user"))]
    DeleteCurrentUser,
    #[snafu(display("{command}: cannot access /etc/passwd"))]
    PasswdUnavailable { command: &'static str },
    #[snafu(display("help: no help topics match '{topic}'"))]
    UnknownTopic { topic: String },
    #[snafu(display("{command}: cannot {action} '{operand}': {}", source.reason()))]
    Cannot {
        command: &'static str,
        action: &'static str,
        operand: String,
        source: FilesystemError,
    },
    #[snafu(display("{command}: {operand}: {}", source.reason()))]
    Operand {
        command: &'static str,
        operand: String,
        source: FilesystemError,
    },
    #[snafu(display("cd: {}: {operand}", source.reason().to_lowercase()))]
    ChangeDirectory {
        operand: String,
        source: FilesystemError,
    },
    #[snafu(display("mv: cannot move '{from}' to '{to}': {}", source.reason()))]
    Move {
        from: String,
        to: String,
        source: FilesystemError,
    },
}

impl CommandError {
    /// The underlying tree error, when the command failed on the tree.
    pub fn filesystem_error(&self) -> Option<&FilesystemError> {
        match self {
            CommandError::Cannot { source, .. }
            | CommandError::Operand { source, .. }
            | CommandError::ChangeDirectory { source, .. }
            | CommandError::Move { source, .. } => Some(source),
            _ => None,
        }
    }
}
