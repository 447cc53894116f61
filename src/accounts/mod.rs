//! User accounts as the virtual tree records them: entries in `/etc/passwd`
//! and a home directory per user.

mod home;
mod passwd;

pub use home::{USER_EXAMPLE_MARKDOWN, home_directory, user_welcome};
pub use passwd::{
    PASSWD_PATH, ROOT_USER, has_user, is_valid_user_name, passwd_entry, user_names, without_user,
};
