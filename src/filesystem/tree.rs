use std::collections::btree_map::Entry;

use snafu::{OptionExt, ensure};

use crate::filesystem::error::*;
use crate::filesystem::node::{Children, FilesystemNode};
use crate::path::{self, ROOT};

/// Why a path could not be used as a directory
enum LookupFailure {
    Missing,
    NotADirectory,
}

/// The in-memory file tree.
///
/// Operations take absolute paths; anything else is resolved against the
/// root. Each operation checks all of its preconditions before touching the
/// tree, so a returned error always means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileTree {
    root: FilesystemNode,
}

impl Default for VirtualFileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileTree {
    /// Creates a tree holding only an empty root directory.
    pub fn new() -> Self {
        Self {
            root: FilesystemNode::empty_directory(),
        }
    }

    /// Wraps an already validated root node.
    pub(super) fn from_root(root: FilesystemNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &FilesystemNode {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> Result<&FilesystemNode, FilesystemError> {
        let path = canonical(path);
        self.lookup(&path).context(NotFoundSnafu { path: &path })
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.lookup(&canonical(path))
            .is_some_and(FilesystemNode::is_directory)
    }

    /// Names of the entries of a directory, in lexicographic order.
    pub fn list(&self, path: &str) -> Result<Vec<&str>, FilesystemError> {
        let path = canonical(path);
        match self.lookup(&path) {
            Some(FilesystemNode::Directory { children }) => {
                Ok(children.keys().map(String::as_str).collect())
            }
            Some(FilesystemNode::File { .. }) => NotADirectorySnafu { path }.fail(),
            None => NotFoundSnafu { path }.fail(),
        }
    }

    /// Creates an empty directory. Any existing entry with that name blocks it.
    pub fn create_directory(&mut self, path: &str) -> Result<(), FilesystemError> {
        let (parent, name) = path::split_parent_and_base(path, ROOT, ROOT);
        let path = canonical(path);
        ensure!(!name.is_empty(), AlreadyExistsSnafu { path });

        let children = self.parent_directory_mut(&parent, &path)?;
        match children.entry(name) {
            Entry::Occupied(_) => AlreadyExistsSnafu { path }.fail(),
            Entry::Vacant(slot) => {
                slot.insert(FilesystemNode::empty_directory());
                Ok(())
            }
        }
    }

    /// Writes `content` to a file, replacing the content of an existing file
    /// or creating a new one.
    pub fn create_or_truncate_file(
        &mut self,
        path: &str,
        content: impl Into<String>,
    ) -> Result<(), FilesystemError> {
        let (parent, name) = path::split_parent_and_base(path, ROOT, ROOT);
        let path = canonical(path);
        ensure!(!name.is_empty(), TargetIsDirectorySnafu { path });

        let children = self.parent_directory_mut(&parent, &path)?;
        match children.get_mut(&name) {
            Some(FilesystemNode::Directory { .. }) => TargetIsDirectorySnafu { path }.fail(),
            Some(FilesystemNode::File { content: existing }) => {
                *existing = content.into();
                Ok(())
            }
            None => {
                children.insert(name, FilesystemNode::file(content));
                Ok(())
            }
        }
    }

    pub fn read_file(&self, path: &str) -> Result<&str, FilesystemError> {
        let path = canonical(path);
        match self.lookup(&path) {
            Some(FilesystemNode::File { content }) => Ok(content.as_str()),
            Some(FilesystemNode::Directory { .. }) => IsADirectorySnafu { path }.fail(),
            None => NotFoundSnafu { path }.fail(),
        }
    }

    /// Deletes an entry. Empty directories and files go regardless of
    /// `recursive`; a directory with entries needs it.
    pub fn remove(&mut self, path: &str, recursive: bool) -> Result<(), FilesystemError> {
        let (parent, name) = path::split_parent_and_base(path, ROOT, ROOT);
        let path = canonical(path);
        ensure!(!name.is_empty(), InvalidTargetSnafu { path });

        let Ok(children) = self.directory_mut(&parent) else {
            return NotFoundSnafu { path }.fail();
        };
        let Some(target) = children.get(&name) else {
            return NotFoundSnafu { path }.fail();
        };
        if let FilesystemNode::Directory { children: entries } = target {
            ensure!(
                recursive || entries.is_empty(),
                DirectoryNotEmptySnafu { path }
            );
        }

        children.remove(&name);
        Ok(())
    }

    /// Places an independent deep copy of `source` at `dest`, replacing
    /// whatever `dest` held.
    pub fn copy(&mut self, source: &str, dest: &str) -> Result<(), FilesystemError> {
        let source_path = canonical(source);
        let node = self
            .lookup(&source_path)
            .context(SourceNotFoundSnafu { path: &source_path })?
            .clone();

        let (dest_parent, dest_name) = path::split_parent_and_base(dest, ROOT, ROOT);
        let dest_path = canonical(dest);
        ensure!(!dest_name.is_empty(), InvalidTargetSnafu { path: dest_path });

        let children = self.destination_directory_mut(&dest_parent, &dest_path)?;
        children.insert(dest_name, node);
        Ok(())
    }

    /// Relinks the node at `source` under `dest`, replacing whatever `dest`
    /// held. Moving a node onto its own path succeeds without changes.
    pub fn r#move(&mut self, source: &str, dest: &str) -> Result<(), FilesystemError> {
        let (source_parent, source_name) = path::split_parent_and_base(source, ROOT, ROOT);
        let source_path = canonical(source);
        ensure!(
            !source_name.is_empty(),
            InvalidTargetSnafu { path: &source_path }
        );
        ensure!(
            self.lookup(&source_path).is_some(),
            SourceNotFoundSnafu { path: &source_path }
        );

        let (dest_parent, dest_name) = path::split_parent_and_base(dest, ROOT, ROOT);
        let dest_path = canonical(dest);
        ensure!(!dest_name.is_empty(), InvalidTargetSnafu { path: &dest_path });
        match self.directory(&dest_parent) {
            Ok(_) => {}
            Err(LookupFailure::Missing) => {
                return DestParentNotFoundSnafu { path: dest_path }.fail();
            }
            Err(LookupFailure::NotADirectory) => {
                return DestParentNotADirectorySnafu { path: dest_path }.fail();
            }
        }

        if source_path == dest_path {
            return Ok(());
        }
        ensure!(
            !path::is_same_or_descendant(&dest_parent, &source_path),
            DestinationInsideSourceSnafu { path: &dest_path }
        );

        let node = self
            .directory_mut(&source_parent)
            .ok()
            .and_then(|children| children.remove(&source_name))
            .context(SourceNotFoundSnafu { path: &source_path })?;

        match self.directory_mut(&dest_parent) {
            Ok(children) => {
                children.insert(dest_name, node);
                Ok(())
            }
            Err(_) => {
                // Unreachable after the checks above; put the node back so the
                // tree stays untouched.
                if let Ok(children) = self.directory_mut(&source_parent) {
                    children.insert(source_name, node);
                }
                DestParentNotFoundSnafu { path: dest_path }.fail()
            }
        }
    }

    fn lookup(&self, path: &str) -> Option<&FilesystemNode> {
        path::segments(path).try_fold(&self.root, |node, name| node.child(name))
    }

    fn lookup_mut(&mut self, path: &str) -> Option<&mut FilesystemNode> {
        let mut current = &mut self.root;
        for name in path::segments(path) {
            current = current.child_mut(name)?;
        }
        Some(current)
    }

    fn directory(&self, path: &str) -> Result<&Children, LookupFailure> {
        match self.lookup(path) {
            Some(FilesystemNode::Directory { children }) => Ok(children),
            Some(FilesystemNode::File { .. }) => Err(LookupFailure::NotADirectory),
            None => Err(LookupFailure::Missing),
        }
    }

    fn directory_mut(&mut self, path: &str) -> Result<&mut Children, LookupFailure> {
        match self.lookup_mut(path) {
            Some(FilesystemNode::Directory { children }) => Ok(children),
            Some(FilesystemNode::File { .. }) => Err(LookupFailure::NotADirectory),
            None => Err(LookupFailure::Missing),
        }
    }

    fn parent_directory_mut(
        &mut self,
        parent: &str,
        path: &str,
    ) -> Result<&mut Children, FilesystemError> {
        self.directory_mut(parent).map_err(|failure| match failure {
            LookupFailure::Missing => FilesystemError::ParentNotFound { path: path.into() },
            LookupFailure::NotADirectory => {
                FilesystemError::ParentNotADirectory { path: path.into() }
            }
        })
    }

    fn destination_directory_mut(
        &mut self,
        parent: &str,
        path: &str,
    ) -> Result<&mut Children, FilesystemError> {
        self.directory_mut(parent).map_err(|failure| match failure {
            LookupFailure::Missing => FilesystemError::DestParentNotFound { path: path.into() },
            LookupFailure::NotADirectory => {
                FilesystemError::DestParentNotADirectory { path: path.into() }
            }
        })
    }
}

fn canonical(path: &str) -> String {
    path::normalize(path, ROOT, ROOT)
}
