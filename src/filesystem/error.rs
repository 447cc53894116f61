use snafu::Snafu;

/// Expected, recoverable failures of tree operations.
///
/// Every variant carries the absolute path the failure refers to, so callers
/// can phrase their own messages without walking the tree again.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FilesystemError {
    #[snafu(display("{path}: no such file or directory"))]
    NotFound { path: String },
    #[snafu(display("{path}: not a directory"))]
    NotADirectory { path: String },
    #[snafu(display("{path}: is a directory"))]
    IsADirectory { path: String },
    #[snafu(display("parent of {path} does not exist"))]
    ParentNotFound { path: String },
    #[snafu(display("parent of {path} is not a directory"))]
    ParentNotADirectory { path: String },
    #[snafu(display("{path}: already exists"))]
    AlreadyExists { path: String },
    #[snafu(display("{path}: directory not empty"))]
    DirectoryNotEmpty { path: String },
    #[snafu(display("{path}: target is a directory"))]
    TargetIsDirectory { path: String },
    #[snafu(display("source {path} does not exist"))]
    SourceNotFound { path: String },
    #[snafu(display("parent of destination {path} does not exist"))]
    DestParentNotFound { path: String },
    #[snafu(display("parent of destination {path} is not a directory"))]
    DestParentNotADirectory { path: String },
    #[snafu(display("{path} lies inside the directory being moved"))]
    DestinationInsideSource { path: String },
    #[snafu(display("{path} cannot be the target of this operation"))]
    InvalidTarget { path: String },
}

impl FilesystemError {
    /// The absolute path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            FilesystemError::NotFound { path }
            | FilesystemError::NotADirectory { path }
            | FilesystemError::IsADirectory { path }
            | FilesystemError::ParentNotFound { path }
            | FilesystemError::ParentNotADirectory { path }
            | FilesystemError::AlreadyExists { path }
            | FilesystemError::DirectoryNotEmpty { path }
            | FilesystemError::TargetIsDirectory { path }
            | FilesystemError::SourceNotFound { path }
            | FilesystemError::DestParentNotFound { path }
            | FilesystemError::DestParentNotADirectory { path }
            | FilesystemError::DestinationInsideSource { path }
            | FilesystemError::InvalidTarget { path } => path,
        }
    }

    /// Conventional shell phrase for the error kind.
    pub fn reason(&self) -> &'static str {
        match self {
            FilesystemError::NotFound { .. }
            | FilesystemError::ParentNotFound { .. }
            | FilesystemError::SourceNotFound { .. }
            | FilesystemError::DestParentNotFound { .. } => "No such file or directory",
            FilesystemError::NotADirectory { .. }
            | FilesystemError::ParentNotADirectory { .. }
            | FilesystemError::DestParentNotADirectory { .. } => "Not a directory",
            FilesystemError::IsADirectory { .. } | FilesystemError::TargetIsDirectory { .. } => {
                "Is a directory"
            }
            FilesystemError::AlreadyExists { .. } => "File exists",
            FilesystemError::DirectoryNotEmpty { .. } => "Directory not empty",
            FilesystemError::DestinationInsideSource { .. }
            | FilesystemError::InvalidTarget { .. } => "Invalid argument",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(FilesystemError::NotFound { path: "/a".into() }, "No such file or directory")]
    #[case(FilesystemError::DestParentNotFound { path: "/a".into() }, "No such file or directory")]
    #[case(FilesystemError::ParentNotADirectory { path: "/a".into() }, "Not a directory")]
    #[case(FilesystemError::TargetIsDirectory { path: "/a".into() }, "Is a directory")]
    #[case(FilesystemError::AlreadyExists { path: "/a".into() }, "File exists")]
    #[case(FilesystemError::DirectoryNotEmpty { path: "/a".into() }, "Directory not empty")]
    #[case(FilesystemError::InvalidTarget { path: "/".into() }, "Invalid argument")]
    fn reason_follows_shell_phrasing(#[case] error: FilesystemError, #[case] reason: &str) {
        assert_eq!(error.reason(), reason);
    }

    #[test]
    fn path_is_exposed_for_every_kind() {
        let error = FilesystemError::DestinationInsideSource {
            path: "/a/b".into(),
        };
        assert_eq!(error.path(), "/a/b");
        assert!(error.to_string().contains("/a/b"));
    }
}
