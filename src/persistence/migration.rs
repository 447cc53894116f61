use snafu::{ResultExt, Snafu, ensure};
use tracing::info;

use crate::filesystem::{
    FilesystemError, FilesystemSnapshot, SCHEMA_VERSION, SnapshotError, VirtualFileTree,
};
use crate::persistence::seed;

/// Brings a stored snapshot up to `SCHEMA_VERSION` and rebuilds the tree.
///
/// Snapshots without a version are treated as version 1. Snapshots written
/// by a newer build are refused rather than guessed at.
pub fn upgrade(
    snapshot: FilesystemSnapshot,
    user: &str,
) -> Result<VirtualFileTree, MigrationError> {
    let version = snapshot.version.max(1);
    ensure!(
        version <= SCHEMA_VERSION,
        UnsupportedVersionSnafu { version }
    );

    let mut tree = VirtualFileTree::try_from(snapshot.root).context(InvalidSnapshotSnafu)?;

    if version < 2 {
        info!("Migrating file system from version {version} to 2");
        add_version_two_defaults(&mut tree, user).context(StepSnafu { version: 2u32 })?;
    }

    Ok(tree)
}

/// Version 2 introduced the markdown sample, the hosts file and `/tmp`.
fn add_version_two_defaults(tree: &mut VirtualFileTree, user: &str) -> Result<(), FilesystemError> {
    let home = format!("/home/{user}");
    if !tree.is_directory(&home) {
        return Ok(());
    }

    let example = format!("{home}/example.md");
    if !tree.exists(&example) {
        tree.create_or_truncate_file(&example, seed::EXAMPLE_MARKDOWN)?;
    }
    if tree.is_directory("/etc") && !tree.exists("/etc/hosts") {
        tree.create_or_truncate_file("/etc/hosts", seed::HOSTS)?;
    }
    if !tree.exists("/tmp") {
        tree.create_directory("/tmp")?;
    }
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum MigrationError {
    #[snafu(display(
        "Saved file system has version {}, newer than supported version {}",
        version,
        SCHEMA_VERSION
    ))]
    UnsupportedVersion { version: u32 },
    #[snafu(display("Saved file system is malformed"))]
    InvalidSnapshot { source: SnapshotError },
    #[snafu(display("Failed to migrate file system to version {}", version))]
    StepError {
        version: u32,
        source: FilesystemError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FilesystemNode;

    fn version_one_root() -> FilesystemNode {
        FilesystemNode::directory([
            (
                "home",
                FilesystemNode::directory([(
                    "u",
                    FilesystemNode::directory([("welcome.txt", FilesystemNode::file("hi"))]),
                )]),
            ),
            (
                "etc",
                FilesystemNode::directory([("passwd", FilesystemNode::file(""))]),
            ),
        ])
    }

    #[test]
    fn current_version_is_restored_as_is() {
        let tree = seed::default_tree("u").unwrap();
        let upgraded = upgrade(tree.snapshot(), "u").unwrap();
        assert_eq!(upgraded, tree);
    }

    #[test]
    fn version_one_gains_new_defaults() {
        let snapshot = FilesystemSnapshot {
            version: 1,
            root: version_one_root(),
        };

        let tree = upgrade(snapshot, "u").unwrap();
        assert_eq!(
            tree.read_file("/home/u/example.md"),
            Ok(seed::EXAMPLE_MARKDOWN)
        );
        assert_eq!(tree.read_file("/etc/hosts"), Ok(seed::HOSTS));
        assert!(tree.is_directory("/tmp"));
        assert_eq!(tree.read_file("/home/u/welcome.txt"), Ok("hi"));
    }

    #[test]
    fn unversioned_snapshot_is_treated_as_version_one() {
        let snapshot = FilesystemSnapshot {
            version: 0,
            root: version_one_root(),
        };
        let tree = upgrade(snapshot, "u").unwrap();
        assert!(tree.is_directory("/tmp"));
    }

    #[test]
    fn version_one_without_home_is_left_alone() {
        let snapshot = FilesystemSnapshot {
            version: 1,
            root: version_one_root(),
        };
        let tree = upgrade(snapshot, "someone-else").unwrap();
        assert!(!tree.exists("/tmp"));
        assert!(!tree.exists("/etc/hosts"));
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let mut root = version_one_root();
        if let FilesystemNode::Directory { children } = &mut root {
            children.insert("tmp".into(), FilesystemNode::file("not a dir"));
        }
        let snapshot = FilesystemSnapshot { version: 1, root };

        let tree = upgrade(snapshot, "u").unwrap();
        assert_eq!(tree.read_file("/tmp"), Ok("not a dir"));
    }

    #[test]
    fn newer_versions_are_refused() {
        let snapshot = FilesystemSnapshot {
            version: SCHEMA_VERSION + 1,
            root: FilesystemNode::empty_directory(),
        };
        assert!(matches!(
            upgrade(snapshot, "u"),
            Err(MigrationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn malformed_root_is_reported() {
        let snapshot = FilesystemSnapshot {
            version: 1,
            root: FilesystemNode::file(""),
        };
        assert!(matches!(
            upgrade(snapshot, "u"),
            Err(MigrationError::InvalidSnapshot { .. })
        ));
    }
}
