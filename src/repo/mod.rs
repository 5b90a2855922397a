//! The repository domain model on top of libgit2.
//!
//! A [`Repo`] owns the libgit2 handle; every entity derived from it (refs,
//! commits, trees, blobs) borrows from that handle and lives no longer than
//! the request that asked for it.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{BlameOptions, BranchType, ErrorCode, ObjectType, Oid, Sort};
use log::warn;

use crate::error::{Error, Result};
use crate::paths::CanonicalPath;
use crate::user::UserDirectory;

mod blob;
pub use blob::{Blame, Blob};

mod commit;
pub use commit::Commit;

mod diff;
pub use diff::{diff, Diff, Patch};

mod reference;
pub use reference::Ref;

mod tree;
pub use tree::{sub_tree, tree_entries, EntryKind, TreeEntry};

/// An open repository.
pub struct Repo {
    name: String,
    path: PathBuf,
    description: String,
    inner: git2::Repository,
}

impl Repo {
    /// Open the repository at `path`.
    ///
    /// The description is read from the `description` sidecar file (bare
    /// layout, with a `.git/` fallback for work trees) and defaults to empty
    /// when unreadable.
    pub fn open(name: &str, path: &Path) -> Result<Repo> {
        let inner = git2::Repository::open(path)?;

        let description = fs::read_to_string(path.join("description"))
            .or_else(|_| fs::read_to_string(path.join(".git/description")))
            .unwrap_or_else(|e| {
                warn!("no description for {}: {}", path.display(), e);
                String::new()
            });

        Ok(Repo {
            name: name.to_string(),
            path: path.to_path_buf(),
            description,
            inner,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn inner(&self) -> &git2::Repository {
        &self.inner
    }

    /// Local branches, in branch-iterator order.
    pub fn refs(&self) -> Result<Vec<Ref<'_>>> {
        let mut refs = Vec::new();
        for branch in self.inner.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            refs.push(Ref::new(branch.into_reference()));
        }
        Ok(refs)
    }

    /// Look a branch up by name, local branches shadowing remote ones.
    pub fn lookup_ref(&self, name: &str) -> Result<Ref<'_>> {
        let branch = self
            .inner
            .find_branch(name, BranchType::Local)
            .or_else(|_| self.inner.find_branch(name, BranchType::Remote))
            .map_err(|e| not_found(format!("ref {}", name), e))?;
        Ok(Ref::new(branch.into_reference()))
    }

    /// Look a commit up by its full hex hash.
    pub fn lookup_commit(&self, hash: &str, users: &UserDirectory) -> Result<Commit<'_>> {
        let oid: Oid = hash
            .parse()
            .map_err(|_| Error::BadRequest(format!("invalid object id {}", hash)))?;
        let commit = self
            .inner
            .find_commit(oid)
            .map_err(|e| not_found(format!("commit {}", hash), e))?;
        Ok(Commit::new(commit, users))
    }

    /// The commit a ref points at.
    pub fn default_commit<'a>(&self, r: &Ref<'a>, users: &UserDirectory) -> Result<Commit<'a>> {
        let commit = r
            .inner()
            .peel_to_commit()
            .map_err(|e| not_found(format!("commit for ref {}", r.name()), e))?;
        Ok(Commit::new(commit, users))
    }

    /// Commit history, newest first, restricted to first-parent lineage.
    ///
    /// With a ref the walk seeds from that ref's tip; without one it seeds
    /// from all refs, producing the global history.
    pub fn commit_log(&self, r: Option<&Ref<'_>>, users: &UserDirectory) -> Result<Vec<Commit<'_>>> {
        let mut walk = self.inner.revwalk()?;
        match r {
            Some(r) => {
                let target = r
                    .target()
                    .ok_or_else(|| Error::NotFound(format!("target of ref {}", r.name())))?;
                walk.push(target)?;
            }
            None => walk.push_glob("*")?,
        }
        walk.set_sorting(Sort::TIME)?;
        walk.simplify_first_parent()?;

        let mut commits = Vec::new();
        for oid in walk {
            let commit = self.inner.find_commit(oid?)?;
            commits.push(Commit::new(commit, users));
        }
        Ok(commits)
    }

    /// Resolve `path` against the commit's tree and read it as a blob.
    pub fn read_blob(&self, commit: &Commit<'_>, path: &str) -> Result<Blob> {
        let tree = commit
            .tree()
            .map_err(|e| Error::Corrupt(format!("commit {} has no tree: {}", commit.hash(), e)))?;

        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| Error::NotFound(format!("path {}", path)))?;
        if entry.kind() != Some(ObjectType::Blob) {
            return Err(Error::NotFound(format!("file {}", path)));
        }

        let blob = self
            .inner
            .find_blob(entry.id())
            .map_err(|e| Error::Corrupt(format!("blob {} unreadable: {}", path, e)))?;

        Ok(Blob::new(path, blob.content()))
    }

    /// Read a blob and attribute each of its lines as of `commit`.
    ///
    /// Lines whose blame hunk cannot be resolved keep their slot with no
    /// user, so the attribution sequence always matches the line count.
    pub fn read_blob_blame(
        &self,
        commit: &Commit<'_>,
        path: &str,
        users: &UserDirectory,
    ) -> Result<Blame> {
        let mut opts = BlameOptions::new();
        opts.newest_commit(commit.id());

        let blame = self
            .inner
            .blame_file(Path::new(path), Some(&mut opts))
            .map_err(|e| not_found(format!("blame for {}", path), e))?;

        let blob = self.read_blob(commit, path)?;

        let mut line_users = Vec::with_capacity(blob.lines.len());
        for line in 1..=blob.lines.len() {
            let user = blame
                .get_line(line)
                .and_then(|hunk| hunk.final_signature().email().map(|e| e.to_string()))
                .and_then(|email| users.resolve(&email));
            line_users.push(user);
        }

        Ok(Blame {
            blob,
            users: line_users,
        })
    }

    /// List the directory `dir_path` of the commit's tree.
    ///
    /// The root (`""` or `"/"`) is listed directly; any other path is listed
    /// as a subtree with the synthetic `..` entry prepended.
    pub fn file_tree(&self, commit: &Commit<'_>, dir_path: &str) -> Result<Vec<TreeEntry>> {
        let tree = commit
            .tree()
            .map_err(|e| Error::Corrupt(format!("commit {} has no tree: {}", commit.hash(), e)))?;

        if dir_path.is_empty() || dir_path == "/" {
            Ok(tree_entries(&tree, ""))
        } else {
            sub_tree(&self.inner, &tree, dir_path)
        }
    }
}

impl CanonicalPath for Repo {
    fn canonical_path(&self) -> String {
        format!("/repo/{}", self.name)
    }
}

fn not_found(what: String, e: git2::Error) -> Error {
    if e.code() == ErrorCode::NotFound {
        Error::NotFound(what)
    } else {
        Error::Git(e)
    }
}
