use regex::Regex;
use snafu::{IntoError, OptionExt, ResultExt, ensure};
use tracing::{debug, info};

use crate::accounts::{
    PASSWD_PATH, ROOT_USER, USER_EXAMPLE_MARKDOWN, has_user, home_directory, is_valid_user_name,
    passwd_entry, user_names, user_welcome, without_user,
};

use crate::commands::command::{COMMANDS, CdTarget, Command, Redirect, command_info};
use crate::commands::error::*;
use crate::commands::tokenizer::{RedirectMode, tokenize};
use crate::filesystem::{FilesystemError, VirtualFileTree};
use crate::path::{self, ROOT};

/// Escape sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// What a successful command line produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    /// The tree may have changed and should be saved.
    pub modified: bool,
    /// The user asked to leave the shell.
    pub exit: bool,
}

impl CommandOutput {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// One shell: the tree it works on plus the state commands carry between lines.
#[derive(Debug)]
pub struct Session {
    tree: VirtualFileTree,
    user: String,
    home: String,
    cwd: String,
    previous: String,
    history: Vec<String>,
}

impl Session {
    /// Starts in the user's home directory, or at the root when the tree has none.
    pub fn new(tree: VirtualFileTree, user: impl Into<String>) -> Self {
        let user = user.into();
        let home = home_directory(&user);
        let cwd = if tree.is_directory(&home) {
            home.clone()
        } else {
            ROOT.to_string()
        };

        Self {
            tree,
            user,
            home,
            cwd,
            previous: ROOT.to_string(),
            history: Vec::new(),
        }
    }

    pub fn tree(&self) -> &VirtualFileTree {
        &self.tree
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Runs one command line against the tree.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutput, CommandError> {
        let line = line.trim();
        if !line.is_empty() {
            self.history.push(line.to_string());
        }

        let Some(command) = Command::parse(tokenize(line)?)? else {
            return Ok(CommandOutput::default());
        };
        debug!("Executing {:?} in {}", command, self.cwd);

        let modified = command.modifies_tree();
        let mut output = self.dispatch(command).inspect_err(|err| {
            if let Some(source) = err.filesystem_error() {
                debug!("Tree operation failed at {}: {:?}", source.path(), source);
            }
        })?;
        output.modified = modified;
        Ok(output)
    }

    fn dispatch(&mut self, command: Command) -> Result<CommandOutput, CommandError> {
        let text = match command {
            Command::Ls { path } => self.ls(path.as_deref())?,
            Command::Cd { target } => {
                self.cd(target)?;
                String::new()
            }
            Command::Pwd => self.cwd.clone(),
            Command::Mkdir { path } => {
                let target = self.resolve(&path);
                self.tree
                    .create_directory(&target)
                    .context(CannotSnafu {
                        command: "mkdir",
                        action: "create directory",
                        operand: &path,
                    })?;
                String::new()
            }
            Command::Touch { path } => {
                self.touch(&path)?;
                String::new()
            }
            Command::Cat { path } => self
                .tree
                .read_file(&self.resolve(&path))
                .context(OperandSnafu {
                    command: "cat",
                    operand: &path,
                })?
                .to_string(),
            Command::Rm { path, recursive } => {
                let target = self.resolve(&path);
                self.tree
                    .remove(&target, recursive)
                    .context(CannotSnafu {
                        command: "rm",
                        action: "remove",
                        operand: &path,
                    })?;
                String::new()
            }
            Command::Echo {
                text,
                redirect: None,
            } => text,
            Command::Echo {
                text,
                redirect: Some(redirect),
            } => {
                self.write_redirect(text, redirect)?;
                String::new()
            }
            Command::Cp { source, dest } => {
                self.cp(&source, &dest)?;
                String::new()
            }
            Command::Mv { source, dest } => {
                self.mv(&source, &dest)?;
                String::new()
            }
            Command::Grep { pattern, path } => self.grep(&pattern, &path)?,
            Command::Whoami => self.user.clone(),
            Command::Useradd { user } => self.useradd(&user)?,
            Command::Userdel { user, remove_home } => self.userdel(&user, remove_home)?,
            Command::Su { user } => {
                self.su(user.unwrap_or_else(|| ROOT_USER.to_string()))?;
                String::new()
            }
            Command::Users => self.users()?,
            Command::History { limit } => self.history_listing(limit),
            Command::Help { topic } => help(topic.as_deref())?,
            Command::Clear => CLEAR_SCREEN.to_string(),
            Command::Exit => {
                return Ok(CommandOutput {
                    exit: true,
                    ..CommandOutput::default()
                });
            }
        };

        Ok(CommandOutput::text(text))
    }

    fn resolve(&self, raw: &str) -> String {
        path::normalize(raw, &self.cwd, &self.home)
    }

    fn ls(&self, path: Option<&str>) -> Result<String, CommandError> {
        let operand = path.unwrap_or(".");
        let names = self
            .tree
            .list(&self.resolve(operand))
            .map_err(|error| {
                let action = match error {
                    FilesystemError::NotADirectory { .. } => "list",
                    _ => "access",
                };
                CannotSnafu {
                    command: "ls",
                    action,
                    operand,
                }
                .into_error(error)
            })?;
        Ok(names.join("  "))
    }

    fn cd(&mut self, target: CdTarget) -> Result<(), CommandError> {
        let (operand, destination) = match target {
            CdTarget::Home => (self.home.clone(), self.home.clone()),
            CdTarget::Previous => (self.previous.clone(), self.previous.clone()),
            CdTarget::Path(raw) => {
                let destination = self.resolve(&raw);
                (raw, destination)
            }
        };

        self.tree
            .list(&destination)
            .context(ChangeDirectorySnafu { operand })?;

        self.previous = std::mem::replace(&mut self.cwd, destination);
        Ok(())
    }

    fn touch(&mut self, raw: &str) -> Result<(), CommandError> {
        let path = self.resolve(raw);
        if self.tree.exists(&path) {
            return Ok(());
        }
        self.tree
            .create_or_truncate_file(&path, "")
            .context(CannotSnafu {
                command: "touch",
                action: "touch",
                operand: raw,
            })
    }

    fn write_redirect(&mut self, text: String, redirect: Redirect) -> Result<(), CommandError> {
        let path = self.resolve(&redirect.target);
        let context = CannotSnafu {
            command: "echo",
            action: "write to",
            operand: &redirect.target,
        };

        let content = match redirect.mode {
            RedirectMode::Truncate => text,
            RedirectMode::Append => match self.tree.read_file(&path) {
                Ok("") | Err(FilesystemError::NotFound { .. }) => text,
                Ok(existing) => format!("{existing}\n{text}"),
                Err(error) => return Err(context.into_error(error)),
            },
        };

        self.tree
            .create_or_truncate_file(&path, content)
            .context(context)
    }

    fn cp(&mut self, source: &str, dest: &str) -> Result<(), CommandError> {
        let (from, to) = (self.resolve(source), self.resolve(dest));
        self.tree.copy(&from, &to).map_err(|error| match error {
            FilesystemError::SourceNotFound { .. } => CannotSnafu {
                command: "cp",
                action: "stat",
                operand: source,
            }
            .into_error(error),
            _ => CannotSnafu {
                command: "cp",
                action: "create regular file",
                operand: dest,
            }
            .into_error(error),
        })
    }

    fn mv(&mut self, source: &str, dest: &str) -> Result<(), CommandError> {
        let (from, to) = (self.resolve(source), self.resolve(dest));
        self.tree.r#move(&from, &to).map_err(|error| match error {
            FilesystemError::SourceNotFound { .. } => CannotSnafu {
                command: "mv",
                action: "stat",
                operand: source,
            }
            .into_error(error),
            _ => MoveSnafu {
                from: source,
                to: dest,
            }
            .into_error(error),
        })
    }

    fn grep(&self, pattern: &str, raw: &str) -> Result<String, CommandError> {
        let content = self
            .tree
            .read_file(&self.resolve(raw))
            .context(OperandSnafu {
                command: "grep",
                operand: raw,
            })?;
        let regex = Regex::new(pattern).map_err(|err| {
            InvalidPatternSnafu {
                message: err.to_string(),
            }
            .build()
        })?;
        let matches: Vec<&str> = content
            .lines()
            .filter(|line| regex.is_match(line))
            .collect();
        Ok(matches.join("\n"))
    }

    fn require_root(
        &self,
        command: &'static str,
        action: &'static str,
    ) -> Result<(), CommandError> {
        ensure!(
            self.user == ROOT_USER,
            PermissionDeniedSnafu { command, action }
        );
        Ok(())
    }

    fn knows_user(&self, user: &str) -> bool {
        self.tree
            .read_file(PASSWD_PATH)
            .is_ok_and(|passwd| has_user(passwd, user))
    }

    fn useradd(&mut self, user: &str) -> Result<String, CommandError> {
        self.require_root("useradd", "add")?;
        ensure!(is_valid_user_name(user), InvalidUserNameSnafu);
        let passwd = self
            .tree
            .read_file(PASSWD_PATH)
            .ok()
            .context(PasswdUnavailableSnafu { command: "useradd" })?
            .to_string();
        ensure!(!has_user(&passwd, user), UserExistsSnafu { user });
        ensure!(self.tree.is_directory("/home"), MissingHomeRootSnafu);
        let home = home_directory(user);
        ensure!(!self.tree.exists(&home), HomeExistsSnafu { user });

        let failed = |operand: &str| CannotSnafu {
            command: "useradd",
            action: "create",
            operand: operand.to_string(),
        };
        self.tree.create_directory(&home).context(failed(&home))?;
        for (name, content) in [
            ("welcome.txt", user_welcome(user)),
            ("example.md", USER_EXAMPLE_MARKDOWN.to_string()),
        ] {
            let path = format!("{home}/{name}");
            self.tree
                .create_or_truncate_file(&path, content)
                .context(failed(&path))?;
        }
        self.tree
            .create_or_truncate_file(PASSWD_PATH, format!("{passwd}\n{}", passwd_entry(user)))
            .context(failed(PASSWD_PATH))?;

        info!("Created user {user}");
        Ok(format!("User '{user}' created successfully."))
    }

    fn userdel(&mut self, user: &str, remove_home: bool) -> Result<String, CommandError> {
        self.require_root("userdel", "delete")?;
        ensure!(user != ROOT_USER, DeleteRootSnafu);
        ensure!(user != self.user, DeleteCurrentUserSnafu);
        let passwd = match self.tree.read_file(PASSWD_PATH) {
            Ok(passwd) if has_user(passwd, user) => passwd.to_string(),
            _ => {
                return UnknownUserSnafu {
                    command: "userdel",
                    user,
                }
                .fail();
            }
        };

        let home = home_directory(user);
        if remove_home && self.tree.is_directory(&home) {
            self.tree.remove(&home, true).context(CannotSnafu {
                command: "userdel",
                action: "remove",
                operand: &home,
            })?;
        }
        self.tree
            .create_or_truncate_file(PASSWD_PATH, without_user(&passwd, user))
            .context(CannotSnafu {
                command: "userdel",
                action: "update",
                operand: PASSWD_PATH,
            })?;

        info!("Deleted user {user}");
        Ok(format!("User '{user}' deleted successfully."))
    }

    /// Becomes `user`, starting in their home directory when it exists.
    fn su(&mut self, user: String) -> Result<(), CommandError> {
        ensure!(
            self.knows_user(&user),
            UnknownUserSnafu {
                command: "su",
                user,
            }
        );
        let home = home_directory(&user);
        let destination = if self.tree.is_directory(&home) {
            home.clone()
        } else {
            ROOT.to_string()
        };

        self.previous = std::mem::replace(&mut self.cwd, destination);
        self.user = user;
        self.home = home;
        Ok(())
    }

    fn users(&self) -> Result<String, CommandError> {
        let passwd = self
            .tree
            .read_file(PASSWD_PATH)
            .ok()
            .context(PasswdUnavailableSnafu { command: "users" })?;
        Ok(user_names(passwd).join(" "))
    }

    fn history_listing(&self, limit: Option<usize>) -> String {
        let limit = limit.unwrap_or(self.history.len());
        self.history
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, line)| format!("{}  {line}", index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn help(topic: Option<&str>) -> Result<String, CommandError> {
    match topic {
        None => {
            let width = COMMANDS.iter().map(|info| info.usage.len()).max().unwrap_or(0);
            let mut text = String::from("Available commands:");
            for info in COMMANDS {
                text.push_str(&format!("\n  {:<width$}  {}", info.usage, info.description));
            }
            Ok(text)
        }
        Some(topic) => {
            let info = command_info(topic).context(UnknownTopicSnafu { topic })?;
            Ok(format!("Usage: {}\n{}", info.usage, info.description))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::default_tree;
    use rstest::*;

    #[fixture]
    fn session() -> Session {
        Session::new(default_tree("u").unwrap(), "u")
    }

    fn run(session: &mut Session, line: &str) -> String {
        session
            .execute(line)
            .unwrap_or_else(|error| panic!("`{line}` failed: {error}"))
            .text
    }

    fn fail(session: &mut Session, line: &str) -> String {
        match session.execute(line) {
            Ok(output) => panic!("`{line}` unexpectedly printed {:?}", output.text),
            Err(error) => error.to_string(),
        }
    }

    #[test]
    fn end_to_end_from_an_empty_root() {
        let mut session = Session::new(VirtualFileTree::new(), "u");
        assert_eq!(session.cwd(), "/");

        run(&mut session, "mkdir /home");
        run(&mut session, "mkdir /home/u");
        run(&mut session, "touch /home/u/note.txt");
        run(&mut session, r#"echo "hello" > /home/u/note.txt"#);
        assert_eq!(run(&mut session, "cat /home/u/note.txt"), "hello");

        let error = session.execute("rm /home/u").unwrap_err();
        assert!(matches!(
            error.filesystem_error(),
            Some(FilesystemError::DirectoryNotEmpty { .. })
        ));

        run(&mut session, "rm -r /home/u");
        assert_eq!(run(&mut session, "ls /home"), "");
    }

    #[rstest]
    fn starts_in_home(session: Session) {
        assert_eq!(session.cwd(), "/home/u");
        assert_eq!(session.home(), "/home/u");
        assert_eq!(session.user(), "u");
    }

    #[rstest]
    fn ls_joins_sorted_names(mut session: Session) {
        assert_eq!(run(&mut session, "ls"), "example.md  welcome.txt");
        assert_eq!(run(&mut session, "ls /"), "bin  etc  home  tmp");
        assert_eq!(run(&mut session, "ls /tmp"), "");
    }

    #[rstest]
    fn cd_moves_between_directories(mut session: Session) {
        run(&mut session, "cd /etc");
        assert_eq!(run(&mut session, "pwd"), "/etc");
        run(&mut session, "cd ..");
        assert_eq!(session.cwd(), "/");
        run(&mut session, "cd -");
        assert_eq!(session.cwd(), "/etc");
        run(&mut session, "cd -");
        assert_eq!(session.cwd(), "/");
        run(&mut session, "cd");
        assert_eq!(session.cwd(), "/home/u");
        run(&mut session, "cd ~/../..");
        assert_eq!(session.cwd(), "/");
    }

    #[rstest]
    fn failed_cd_keeps_the_working_directory(mut session: Session) {
        assert_eq!(
            fail(&mut session, "cd nowhere"),
            "cd: no such file or directory: nowhere"
        );
        assert_eq!(
            fail(&mut session, "cd welcome.txt"),
            "cd: not a directory: welcome.txt"
        );
        assert_eq!(session.cwd(), "/home/u");
    }

    #[rstest]
    fn echo_writes_and_appends(mut session: Session) {
        assert_eq!(run(&mut session, "echo hello   world"), "hello world");

        run(&mut session, "echo first >> log.txt");
        run(&mut session, "echo second >> log.txt");
        assert_eq!(run(&mut session, "cat log.txt"), "first\nsecond");

        run(&mut session, "echo reset > log.txt");
        assert_eq!(run(&mut session, "cat ~/log.txt"), "reset");
    }

    #[rstest]
    fn touch_leaves_existing_files_alone(mut session: Session) {
        let before = run(&mut session, "cat welcome.txt");
        run(&mut session, "touch welcome.txt");
        assert_eq!(run(&mut session, "cat welcome.txt"), before);
        run(&mut session, "touch fresh.txt");
        assert_eq!(run(&mut session, "cat fresh.txt"), "");
    }

    #[rstest]
    fn cp_and_mv_relocate_entries(mut session: Session) {
        run(&mut session, "cp welcome.txt /tmp/copy.txt");
        run(&mut session, "mv example.md /tmp/moved.md");
        assert_eq!(run(&mut session, "ls /tmp"), "copy.txt  moved.md");
        assert_eq!(run(&mut session, "ls"), "welcome.txt");
    }

    #[rstest]
    #[case("grep com /etc/hosts", "142.250.190.78 google.com\n140.82.121.3 github.com")]
    #[case("grep ^127 /etc/hosts", "127.0.0.1 localhost")]
    #[case("grep g..gle /etc/hosts", "142.250.190.78 google.com")]
    #[case(r"grep '\.3 ' /etc/hosts", "140.82.121.3 github.com")]
    #[case("grep nothing /etc/hosts", "")]
    fn grep_prints_lines_matching_the_expression(
        mut session: Session,
        #[case] line: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(run(&mut session, line), expected);
    }

    #[rstest]
    fn grep_reports_invalid_expressions(mut session: Session) {
        let error = session.execute(r#"grep "(" /etc/hosts"#).unwrap_err();
        assert!(matches!(error, CommandError::InvalidPattern { .. }));
        assert!(
            error
                .to_string()
                .starts_with("grep: invalid regular expression: ")
        );
    }

    #[rstest]
    fn root_manages_users(mut session: Session) {
        assert_eq!(run(&mut session, "users"), "root u");

        run(&mut session, "su");
        assert_eq!(run(&mut session, "whoami"), "root");
        assert_eq!(session.home(), "/root");
        assert_eq!(session.cwd(), "/");

        assert_eq!(
            run(&mut session, "useradd bob"),
            "User 'bob' created successfully."
        );
        assert_eq!(run(&mut session, "ls /home"), "bob  u");
        assert_eq!(run(&mut session, "ls /home/bob"), "example.md  welcome.txt");
        assert_eq!(
            run(&mut session, "cat /home/bob/welcome.txt"),
            "Welcome, bob!\nThis is your home directory."
        );
        assert_eq!(run(&mut session, "users"), "root u bob");

        assert_eq!(
            run(&mut session, "userdel -r bob"),
            "User 'bob' deleted successfully."
        );
        assert_eq!(run(&mut session, "ls /home"), "u");
        assert_eq!(run(&mut session, "users"), "root u");
    }

    #[rstest]
    fn userdel_without_flag_keeps_the_home_directory(mut session: Session) {
        run(&mut session, "su root");
        run(&mut session, "useradd bob");
        run(&mut session, "userdel bob");
        assert_eq!(run(&mut session, "users"), "root u");
        assert_eq!(run(&mut session, "ls /home"), "bob  u");
    }

    #[rstest]
    fn su_switches_user_and_directory(mut session: Session) {
        run(&mut session, "su root");
        run(&mut session, "useradd bob");
        run(&mut session, "cd /etc");
        run(&mut session, "su bob");
        assert_eq!(session.user(), "bob");
        assert_eq!(session.cwd(), "/home/bob");
        run(&mut session, "cd -");
        assert_eq!(session.cwd(), "/etc");
        run(&mut session, "cd");
        assert_eq!(session.cwd(), "/home/bob");
    }

    #[rstest]
    #[case("useradd bob", "useradd: Permission denied. Only root can add users.")]
    #[case("userdel u", "userdel: Permission denied. Only root can delete users.")]
    #[case("su ghost", "su: user 'ghost' does not exist")]
    fn user_commands_need_root_and_known_users(
        mut session: Session,
        #[case] line: &str,
        #[case] message: &str,
    ) {
        assert_eq!(fail(&mut session, line), message);
        assert_eq!(session.user(), "u");
    }

    #[rstest]
    #[case("useradd u", "useradd: user 'u' already exists")]
    #[case("useradd root", "useradd: user 'root' already exists")]
    #[case("useradd Bad", "useradd: invalid username. Username must start with a letter or underscore and contain only letters, numbers, underscores, or hyphens.")]
    #[case("userdel root", "userdel: cannot delete root user")]
    #[case("userdel ghost", "userdel: user 'ghost' does not exist")]
    fn user_commands_reject_bad_targets(
        mut session: Session,
        #[case] line: &str,
        #[case] message: &str,
    ) {
        run(&mut session, "su");
        let before = session.tree().clone();
        assert_eq!(fail(&mut session, line), message);
        assert_eq!(session.tree(), &before);
    }

    #[test]
    fn useradd_needs_a_home_root() {
        let mut session = Session::new(VirtualFileTree::new(), "root");
        run(&mut session, "mkdir /etc");
        run(&mut session, "echo root:x:0:0:root:/root:/bin/bash > /etc/passwd");
        assert_eq!(
            fail(&mut session, "useradd bob"),
            "useradd: /home directory does not exist"
        );
        run(&mut session, "mkdir /home");
        run(&mut session, "mkdir /home/bob");
        assert_eq!(
            fail(&mut session, "useradd bob"),
            "useradd: home directory for user 'bob' already exists"
        );
        run(&mut session, "rm /etc/passwd");
        assert_eq!(fail(&mut session, "users"), "users: cannot access /etc/passwd");
    }

    #[rstest]
    #[case("ls /missing", "ls: cannot access '/missing': No such file or directory")]
    #[case("ls welcome.txt/x", "ls: cannot access 'welcome.txt/x': No such file or directory")]
    #[case("ls welcome.txt", "ls: cannot list 'welcome.txt': Not a directory")]
    #[case("rm welcome.txt example.md", "rm: extra operand 'example.md'")]
    #[case("mkdir /tmp", "mkdir: cannot create directory '/tmp': File exists")]
    #[case("mkdir /a/b", "mkdir: cannot create directory '/a/b': No such file or directory")]
    #[case("touch /nope/f", "touch: cannot touch '/nope/f': No such file or directory")]
    #[case("cat /etc", "cat: /etc: Is a directory")]
    #[case("cat ghost", "cat: ghost: No such file or directory")]
    #[case("rm /etc", "rm: cannot remove '/etc': Directory not empty")]
    #[case("rm /", "rm: cannot remove '/': Invalid argument")]
    #[case("echo x > /etc", "echo: cannot write to '/etc': Is a directory")]
    #[case("echo x >> /etc", "echo: cannot write to '/etc': Is a directory")]
    #[case("cp ghost x", "cp: cannot stat 'ghost': No such file or directory")]
    #[case("cp welcome.txt /no/x", "cp: cannot create regular file '/no/x': No such file or directory")]
    #[case("mv ghost x", "mv: cannot stat 'ghost': No such file or directory")]
    #[case("mv /home /home/u/h", "mv: cannot move '/home' to '/home/u/h': Invalid argument")]
    #[case("grep x /tmp", "grep: /tmp: Is a directory")]
    #[case("help vim", "help: no help topics match 'vim'")]
    fn failures_use_shell_phrasing(mut session: Session, #[case] line: &str, #[case] message: &str) {
        assert_eq!(fail(&mut session, line), message);
    }

    #[rstest]
    fn failed_commands_leave_the_tree_unchanged(mut session: Session) {
        let before = session.tree().clone();
        for line in [
            "rm /etc",
            "rm welcome.txt example.md",
            "mv /home /home/u/h",
            "cp welcome.txt /no/x",
            "mkdir /tmp",
        ] {
            fail(&mut session, line);
        }
        assert_eq!(session.tree(), &before);
    }

    #[rstest]
    fn history_lists_entries_in_order(mut session: Session) {
        run(&mut session, "pwd");
        run(&mut session, "whoami");
        assert_eq!(
            run(&mut session, "history"),
            "1  pwd\n2  whoami\n3  history"
        );
        assert_eq!(run(&mut session, "history 2"), "1  pwd\n2  whoami");
        assert!(run(&mut session, "history").ends_with("4  history 2\n5  history"));
    }

    #[rstest]
    fn blank_lines_do_nothing(mut session: Session) {
        assert_eq!(session.execute("   "), Ok(CommandOutput::default()));
        assert_eq!(run(&mut session, "history"), "1  history");
    }

    #[rstest]
    fn output_flags_follow_the_command(mut session: Session) {
        assert!(session.execute("mkdir d").unwrap().modified);
        assert!(!session.execute("ls").unwrap().modified);
        assert!(session.execute("exit").unwrap().exit);
        assert_eq!(session.execute("clear").unwrap().text, CLEAR_SCREEN);
    }

    #[rstest]
    fn help_describes_commands(mut session: Session) {
        let all = run(&mut session, "help");
        assert!(all.starts_with("Available commands:"));
        assert_eq!(all.lines().count(), COMMANDS.len() + 1);
        assert_eq!(
            run(&mut session, "help rm"),
            "Usage: rm [-r] <file/directory>\nRemove files or directories"
        );
    }
}
