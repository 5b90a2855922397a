use std::path::Path;

use git2::{ObjectType, Oid, Repository, Tree};

use crate::error::{Error, Result};
use crate::paths::{join_segments, CanonicalPath};

/// What a tree entry points at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Blob,
    Tree,
}

/// A directory listing entry, aware of the directory it was listed under.
#[derive(Clone, Debug)]
pub struct TreeEntry {
    /// Directory the entry was listed under, `""` for the tree root.
    pub dir_path: String,
    pub name: String,
    pub kind: EntryKind,
    pub id: Oid,
}

impl TreeEntry {
    /// True for the synthetic `..` entry that heads a subtree listing.
    pub fn is_parent_link(&self) -> bool {
        self.name == ".."
    }
}

impl CanonicalPath for TreeEntry {
    fn canonical_path(&self) -> String {
        match self.kind {
            EntryKind::Blob => join_segments(&["blob", &self.dir_path, &self.name]),
            EntryKind::Tree if self.is_parent_link() => {
                join_segments(&["tree", &self.dir_path])
            }
            EntryKind::Tree => join_segments(&["tree", &self.dir_path, &self.name]),
        }
    }
}

/// Directory portion of a cleaned relative path; `""` at the root.
pub(crate) fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The `..` entry injected at the head of a subtree listing. Its target is
/// computed by path-splitting, not by a tree lookup.
fn parent_entry(dir_path: &str) -> TreeEntry {
    TreeEntry {
        dir_path: parent_dir(dir_path).to_string(),
        name: "..".to_string(),
        kind: EntryKind::Tree,
        id: Oid::zero(),
    }
}

/// Direct children of `tree`, in object-store order (not sorted further).
///
/// Entries that are neither blobs nor trees (submodule pointers) and entries
/// with non-UTF-8 names are not browsable and are skipped.
pub fn tree_entries(tree: &Tree<'_>, dir_path: &str) -> Vec<TreeEntry> {
    let mut entries = Vec::with_capacity(tree.len());
    for entry in tree.iter() {
        let kind = match entry.kind() {
            Some(ObjectType::Blob) => EntryKind::Blob,
            Some(ObjectType::Tree) => EntryKind::Tree,
            _ => continue,
        };
        let name = match entry.name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        entries.push(TreeEntry {
            dir_path: dir_path.to_string(),
            name,
            kind,
            id: entry.id(),
        });
    }
    entries
}

/// Children of the subtree at `dir_path`, preceded by the synthetic parent
/// entry. `dir_path` must be a cleaned relative path; the root is listed via
/// [`tree_entries`] directly.
pub fn sub_tree(
    repo: &Repository,
    tree: &Tree<'_>,
    dir_path: &str,
) -> Result<Vec<TreeEntry>> {
    let entry = tree
        .get_path(Path::new(dir_path))
        .map_err(|_| Error::NotFound(format!("path {}", dir_path)))?;

    if entry.kind() != Some(ObjectType::Tree) {
        return Err(Error::BadRequest(format!("{} is not a directory", dir_path)));
    }

    let subtree = repo
        .find_tree(entry.id())
        .map_err(|e| Error::Corrupt(format!("subtree {} unreadable: {}", dir_path, e)))?;

    let mut entries = vec![parent_entry(dir_path)];
    entries.extend(tree_entries(&subtree, dir_path));
    Ok(entries)
}
