use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::accounts::is_valid_user_name;

pub const DEFAULT_CONFIG_FILE: &str = "termfs.yaml";
pub const DEFAULT_USER: &str = "currentuser";
pub const DEFAULT_STATE_FILE: &str = ".termfs/filesystem.bin";

const USER_KEY: &str = "user";
const STATE_FILE_KEY: &str = "state_file";
const AUTOSAVE_KEY: &str = "autosave";

/// Settings read from the YAML configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub user: String,
    pub state_file: PathBuf,
    pub autosave: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            autosave: true,
        }
    }
}

impl ShellConfig {
    /// Reads the configuration file; a missing file yields the defaults.
    pub async fn read(path: &Path) -> Result<Self, ShellConfigError> {
        debug!("Opening config file: {}", path.display());
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn with_overrides(
        mut self,
        user: Option<String>,
        state_file: Option<PathBuf>,
    ) -> Result<Self, ShellConfigError> {
        if let Some(user) = user {
            self.user = validate_user(user)?;
        }
        if let Some(state_file) = state_file {
            self.state_file = state_file;
        }
        Ok(self)
    }

    fn from_mapping(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Self, ShellConfigError> {
        let defaults = Self::default();

        let user = match top_level.get(&key(USER_KEY)) {
            Some(value) => validate_user(expect_str(value, USER_KEY)?.to_string())?,
            None => defaults.user,
        };
        let state_file = match top_level.get(&key(STATE_FILE_KEY)) {
            Some(value) => PathBuf::from(expect_str(value, STATE_FILE_KEY)?),
            None => defaults.state_file,
        };
        let autosave = match top_level.get(&key(AUTOSAVE_KEY)) {
            Some(Yaml::Value(Scalar::Boolean(autosave))) => *autosave,
            Some(_) => {
                return InvalidValueSnafu {
                    key: AUTOSAVE_KEY,
                    expected: "a boolean",
                }
                .fail();
            }
            None => defaults.autosave,
        };

        for unknown in top_level
            .keys()
            .filter_map(|k| k.as_str())
            .filter(|k| ![USER_KEY, STATE_FILE_KEY, AUTOSAVE_KEY].contains(k))
        {
            debug!("Ignoring unknown config key '{}'", unknown);
        }

        Ok(Self {
            user,
            state_file,
            autosave,
        })
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ShellConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents)
            .map_err(|e| ShellConfigError::ParseError { source: e })?;
        let contents = contents_vec
            .first()
            .ok_or(ShellConfigError::MalformedConfig)?;

        let top_level = contents
            .as_mapping()
            .ok_or(ShellConfigError::TopLevelNotMap)?;

        Self::from_mapping(top_level)
    }
}

fn key(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

fn expect_str<'a>(value: &'a Yaml, key: &'static str) -> Result<&'a str, ShellConfigError> {
    value.as_str().context(InvalidValueSnafu {
        key,
        expected: "a string",
    })
}

/// User names become directory names under `/home`.
fn validate_user(user: String) -> Result<String, ShellConfigError> {
    ensure!(is_valid_user_name(&user), InvalidUserSnafu { user });
    Ok(user)
}

#[derive(Debug, Snafu)]
pub enum ShellConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be {}", key, expected))]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
    },
    #[snafu(display(
        "Invalid user name '{}': use lowercase letters, digits, '_' or '-', not starting with a digit or '-'",
        user
    ))]
    InvalidUser { user: String },
}
