//! Pure path arithmetic for the virtual tree.
//!
//! Nothing here touches a tree: paths are resolved against a working
//! directory and a home directory supplied by the caller.

mod resolver;

pub use resolver::{ROOT, is_same_or_descendant, normalize, segments, split_parent_and_base};
