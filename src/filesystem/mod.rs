//! Filesystem tree representation.
//!
//! This module provides the in-memory tree behind the shell: nodes are either
//! directories (which own their children) or files holding text. The tree is
//! a plain owned value, so independent instances never share state.

mod error;
mod node;
mod snapshot;
mod tree;

pub use error::FilesystemError;
pub use node::FilesystemNode;
pub use snapshot::{FilesystemSnapshot, SCHEMA_VERSION, SnapshotError};
pub use tree::VirtualFileTree;
