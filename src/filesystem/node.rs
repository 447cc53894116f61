use std::collections::BTreeMap;

use bincode::{Decode, Encode};

/// Children of a directory, keyed by their (slash-free, non-empty) name.
pub type Children = BTreeMap<String, FilesystemNode>;

/// A single entry of the virtual tree
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum FilesystemNode {
    File { content: String },
    Directory { children: Children },
}

impl FilesystemNode {
    pub fn file(content: impl Into<String>) -> Self {
        FilesystemNode::File {
            content: content.into(),
        }
    }

    pub fn empty_directory() -> Self {
        FilesystemNode::Directory {
            children: Children::new(),
        }
    }

    /// Builds a directory from `(name, node)` pairs.
    pub fn directory<N, I>(entries: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, FilesystemNode)>,
    {
        FilesystemNode::Directory {
            children: entries
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FilesystemNode::Directory { .. })
    }

    pub fn children(&self) -> Option<&Children> {
        match self {
            FilesystemNode::Directory { children } => Some(children),
            FilesystemNode::File { .. } => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&FilesystemNode> {
        self.children()?.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut FilesystemNode> {
        match self {
            FilesystemNode::Directory { children } => children.get_mut(name),
            FilesystemNode::File { .. } => None,
        }
    }
}
