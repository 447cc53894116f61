use crate::accounts::ROOT_USER;

pub const USER_EXAMPLE_MARKDOWN: &str = "# Welcome\n\nThis is your personal markdown file.\n\n## Getting Started\n\n- Try using the `ls` command to see files\n- Use `cat` to read files\n- Use `help` to see every command";

pub fn home_directory(user: &str) -> String {
    if user == ROOT_USER {
        "/root".to_string()
    } else {
        format!("/home/{user}")
    }
}

/// Greeting placed in the home directory of a user made with `useradd`.
pub fn user_welcome(user: &str) -> String {
    format!("Welcome, {user}!\nThis is your home directory.")
}
