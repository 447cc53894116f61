use snafu::{OptionExt, ensure};

use crate::commands::error::*;
use crate::commands::tokenizer::{RedirectMode, Token};

/// Static description of a built-in command, used by `help`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "ls",
        usage: "ls [directory]",
        description: "List directory contents",
    },
    CommandInfo {
        name: "cd",
        usage: "cd [directory|-]",
        description: "Change directory",
    },
    CommandInfo {
        name: "pwd",
        usage: "pwd",
        description: "Print working directory",
    },
    CommandInfo {
        name: "mkdir",
        usage: "mkdir <directory>",
        description: "Make a directory",
    },
    CommandInfo {
        name: "touch",
        usage: "touch <file>",
        description: "Create an empty file",
    },
    CommandInfo {
        name: "cat",
        usage: "cat <file>",
        description: "Print file contents",
    },
    CommandInfo {
        name: "rm",
        usage: "rm [-r] <file/directory>",
        description: "Remove files or directories",
    },
    CommandInfo {
        name: "echo",
        usage: "echo <text> [> file | >> file]",
        description: "Display a line of text or write it to a file",
    },
    CommandInfo {
        name: "cp",
        usage: "cp <source> <destination>",
        description: "Copy files and directories",
    },
    CommandInfo {
        name: "mv",
        usage: "mv <source> <destination>",
        description: "Move (rename) files and directories",
    },
    CommandInfo {
        name: "grep",
        usage: "grep <pattern> <file>",
        description: "Print lines of a file matching a regular expression",
    },
    CommandInfo {
        name: "whoami",
        usage: "whoami",
        description: "Print the current user name",
    },
    CommandInfo {
        name: "useradd",
        usage: "useradd <username>",
        description: "Create a new user",
    },
    CommandInfo {
        name: "userdel",
        usage: "userdel [-r] <username>",
        description: "Delete a user",
    },
    CommandInfo {
        name: "su",
        usage: "su [username]",
        description: "Switch user",
    },
    CommandInfo {
        name: "users",
        usage: "users",
        description: "List users on the system",
    },
    CommandInfo {
        name: "history",
        usage: "history [n]",
        description: "Display command history",
    },
    CommandInfo {
        name: "help",
        usage: "help [command]",
        description: "Display help for available commands",
    },
    CommandInfo {
        name: "clear",
        usage: "clear",
        description: "Clear the terminal screen",
    },
    CommandInfo {
        name: "exit",
        usage: "exit",
        description: "Leave the shell",
    },
];

pub fn command_info(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.name == name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub mode: RedirectMode,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdTarget {
    Home,
    Previous,
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls { path: Option<String> },
    Cd { target: CdTarget },
    Pwd,
    Mkdir { path: String },
    Touch { path: String },
    Cat { path: String },
    Rm { path: String, recursive: bool },
    Echo { text: String, redirect: Option<Redirect> },
    Cp { source: String, dest: String },
    Mv { source: String, dest: String },
    Grep { pattern: String, path: String },
    Whoami,
    Useradd { user: String },
    Userdel { user: String, remove_home: bool },
    Su { user: Option<String> },
    Users,
    History { limit: Option<usize> },
    Help { topic: Option<String> },
    Clear,
    Exit,
}

impl Command {
    /// Builds a command from tokens; a blank line yields `None`.
    pub fn parse(tokens: Vec<Token>) -> Result<Option<Self>, CommandError> {
        let mut tokens = tokens.into_iter();
        let name = match tokens.next() {
            None => return Ok(None),
            Some(Token::Word(name)) => name,
            Some(Token::Redirect(mode)) => {
                return UnexpectedTokenSnafu { token: redirect_symbol(mode) }.fail();
            }
        };
        let rest: Vec<Token> = tokens.collect();

        if name == "echo" {
            return parse_echo(rest).map(Some);
        }

        let mut args = Vec::with_capacity(rest.len());
        for token in rest {
            match token {
                Token::Word(word) => args.push(word),
                Token::Redirect(mode) => {
                    return UnexpectedTokenSnafu { token: redirect_symbol(mode) }.fail();
                }
            }
        }
        let mut args = args.into_iter();

        let command = match name.as_str() {
            "ls" => Command::Ls { path: args.next() },
            "cd" => Command::Cd {
                target: match args.next() {
                    None => CdTarget::Home,
                    Some(dash) if dash == "-" => CdTarget::Previous,
                    Some(path) => CdTarget::Path(path),
                },
            },
            "pwd" => Command::Pwd,
            "mkdir" => Command::Mkdir {
                path: single_operand(&mut args, "mkdir")?,
            },
            "touch" => Command::Touch {
                path: single_operand(&mut args, "touch")?,
            },
            "cat" => Command::Cat {
                path: single_operand(&mut args, "cat")?,
            },
            "rm" => parse_rm(args)?,
            "cp" => {
                let (source, dest) = source_and_dest(&mut args, "cp")?;
                Command::Cp { source, dest }
            }
            "mv" => {
                let (source, dest) = source_and_dest(&mut args, "mv")?;
                Command::Mv { source, dest }
            }
            "grep" => {
                let pattern = args.next().context(MissingOperandSnafu { command: "grep" })?;
                let path = single_operand(&mut args, "grep")?;
                Command::Grep { pattern, path }
            }
            "whoami" => Command::Whoami,
            "useradd" => Command::Useradd {
                user: single_operand(&mut args, "useradd")?,
            },
            "userdel" => parse_userdel(args)?,
            "su" => Command::Su { user: args.next() },
            "users" => Command::Users,
            "history" => Command::History {
                limit: args.next().map(|raw| parse_limit(&raw)).transpose()?,
            },
            "help" => Command::Help { topic: args.next() },
            "clear" => Command::Clear,
            "exit" => Command::Exit,
            _ => return UnknownCommandSnafu { name }.fail(),
        };

        Ok(Some(command))
    }

    /// Whether a successful run of this command can change the tree.
    pub fn modifies_tree(&self) -> bool {
        match self {
            Command::Mkdir { .. }
            | Command::Touch { .. }
            | Command::Rm { .. }
            | Command::Cp { .. }
            | Command::Mv { .. }
            | Command::Useradd { .. }
            | Command::Userdel { .. } => true,
            Command::Echo { redirect, .. } => redirect.is_some(),
            Command::Ls { .. }
            | Command::Cd { .. }
            | Command::Pwd
            | Command::Cat { .. }
            | Command::Grep { .. }
            | Command::Whoami
            | Command::Su { .. }
            | Command::Users
            | Command::History { .. }
            | Command::Help { .. }
            | Command::Clear
            | Command::Exit => false,
        }
    }
}

fn parse_rm(args: impl Iterator<Item = String>) -> Result<Command, CommandError> {
    let mut recursive = false;
    let mut operands = Vec::new();
    for arg in args {
        if matches!(arg.as_str(), "-r" | "-R" | "-rf" | "-fr") {
            recursive = true;
        } else if arg != "-f" {
            operands.push(arg);
        }
    }
    let path = single_operand(&mut operands.into_iter(), "rm")?;
    Ok(Command::Rm { path, recursive })
}

fn parse_userdel(args: impl Iterator<Item = String>) -> Result<Command, CommandError> {
    let (flags, operands): (Vec<String>, Vec<String>) = args.partition(|arg| arg == "-r");
    let user = single_operand(&mut operands.into_iter(), "userdel")?;
    Ok(Command::Userdel {
        user,
        remove_home: !flags.is_empty(),
    })
}

/// Takes exactly one operand; anything after it is an error.
fn single_operand(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<String, CommandError> {
    let operand = args.next().context(MissingOperandSnafu { command })?;
    no_extra_operand(args, command)?;
    Ok(operand)
}

fn source_and_dest(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<(String, String), CommandError> {
    let source = args.next().context(MissingFileOperandSnafu { command })?;
    let dest = args.next().context(MissingFileOperandSnafu { command })?;
    no_extra_operand(args, command)?;
    Ok((source, dest))
}

fn no_extra_operand(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<(), CommandError> {
    match args.next() {
        Some(operand) => ExtraOperandSnafu { command, operand }.fail(),
        None => Ok(()),
    }
}

fn parse_echo(tokens: Vec<Token>) -> Result<Command, CommandError> {
    let mut words = Vec::new();
    let mut redirect: Option<Redirect> = None;
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        match token {
            Token::Word(word) => words.push(word),
            Token::Redirect(mode) => {
                ensure!(
                    redirect.is_none(),
                    UnexpectedTokenSnafu { token: redirect_symbol(mode) }
                );
                let target = match tokens.next() {
                    Some(Token::Word(target)) => target,
                    Some(Token::Redirect(next)) => {
                        return UnexpectedTokenSnafu { token: redirect_symbol(next) }.fail();
                    }
                    None => return UnexpectedTokenSnafu { token: "newline" }.fail(),
                };
                redirect = Some(Redirect { mode, target });
            }
        }
    }

    Ok(Command::Echo {
        text: words.join(" "),
        redirect,
    })
}

fn parse_limit(raw: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .ok()
        .filter(|limit| *limit > 0)
        .context(InvalidArgumentSnafu { command: "history" })
}

fn redirect_symbol(mode: RedirectMode) -> &'static str {
    match mode {
        RedirectMode::Truncate => ">",
        RedirectMode::Append => ">>",
    }
}
