//! Host-side persistence of the virtual tree: the snapshot file, schema
//! migrations and the tree a fresh installation starts with.

mod migration;
mod seed;
mod store;

pub use migration::{MigrationError, upgrade};
pub use seed::default_tree;
pub use store::{SnapshotStore, StoreError};
