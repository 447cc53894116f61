pub const PASSWD_PATH: &str = "/etc/passwd";
pub const ROOT_USER: &str = "root";

/// `[a-z_][a-z0-9_-]*`, the shape `useradd` accepts.
pub fn is_valid_user_name(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    valid_start
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// The line `useradd` appends for a new account.
pub fn passwd_entry(user: &str) -> String {
    format!("{user}:x:1001:1001:{user}:/home/{user}:/bin/bash")
}

/// Account names in file order.
pub fn user_names(passwd: &str) -> Vec<&str> {
    passwd
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.split(':').next().unwrap_or(line))
        .collect()
}

pub fn has_user(passwd: &str, user: &str) -> bool {
    user_names(passwd).contains(&user)
}

/// `passwd` with the account's line dropped.
pub fn without_user(passwd: &str, user: &str) -> String {
    passwd
        .lines()
        .filter(|line| line.split(':').next() != Some(user))
        .collect::<Vec<_>>()
        .join("\n")
}
