use bincode::{Decode, Encode};
use snafu::{Snafu, ensure};

use crate::filesystem::{FilesystemNode, VirtualFileTree};

/// Version of the snapshot layout written by this build.
pub const SCHEMA_VERSION: u32 = 2;

/// Serialized form of a tree: a plain nested mapping of name to node, tagged
/// with the schema version it was written with.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct FilesystemSnapshot {
    pub version: u32,
    pub root: FilesystemNode,
}

impl VirtualFileTree {
    /// Captures the tree under the current schema version.
    pub fn snapshot(&self) -> FilesystemSnapshot {
        FilesystemSnapshot {
            version: SCHEMA_VERSION,
            root: self.root().clone(),
        }
    }
}

impl TryFrom<FilesystemNode> for VirtualFileTree {
    type Error = SnapshotError;

    /// Rebuilds a tree from a root node, rejecting shapes that break the
    /// tree invariants.
    fn try_from(root: FilesystemNode) -> Result<Self, Self::Error> {
        ensure!(root.is_directory(), RootNotADirectorySnafu);
        validate_names(&root, "")?;
        Ok(VirtualFileTree::from_root(root))
    }
}

impl TryFrom<FilesystemSnapshot> for VirtualFileTree {
    type Error = SnapshotError;

    fn try_from(snapshot: FilesystemSnapshot) -> Result<Self, Self::Error> {
        snapshot.root.try_into()
    }
}

fn validate_names(node: &FilesystemNode, location: &str) -> Result<(), SnapshotError> {
    let Some(children) = node.children() else {
        return Ok(());
    };
    for (name, child) in children {
        ensure!(
            !name.is_empty() && !name.contains('/'),
            InvalidChildNameSnafu {
                parent: if location.is_empty() { "/" } else { location },
                name: name.as_str(),
            }
        );
        validate_names(child, &format!("{location}/{name}"))?;
    }
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum SnapshotError {
    #[snafu(display("Snapshot root must be a directory"))]
    RootNotADirectory,
    #[snafu(display("Invalid entry name '{}' under {}", name, parent))]
    InvalidChildName { parent: String, name: String },
}
