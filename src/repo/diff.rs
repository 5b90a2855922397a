use git2::{DiffStatsFormat, Tree};

use crate::error::{Error, Result};
use crate::repo::{Commit, Repo};

/// Width of the rendered stats summary, matching `git diff --stat`.
const STATS_WIDTH: usize = 80;

/// One file's worth of change.
#[derive(Clone, Debug)]
pub struct Patch {
    pub old_path: Option<String>,
    pub new_path: Option<String>,

    /// Unified-diff text for this delta.
    pub text: String,
}

/// A tree-to-tree diff between two commits.
#[derive(Clone, Debug)]
pub struct Diff {
    /// The newer commit.
    pub commit_a: String,

    /// The older commit; `None` means the diff was taken against the empty
    /// tree (a repository's first commit).
    pub commit_b: Option<String>,

    /// Human-readable stats summary.
    pub stats: String,

    /// One patch per delta, in object-store order.
    pub patches: Vec<Patch>,
}

/// Diff `commit_a` against `commit_b`, newer minus older.
pub fn diff(repo: &Repo, commit_a: &Commit<'_>, commit_b: Option<&Commit<'_>>) -> Result<Diff> {
    let tree_a = commit_a
        .tree()
        .map_err(|e| Error::Corrupt(format!("commit {} has no tree: {}", commit_a.hash(), e)))?;
    let tree_b: Option<Tree<'_>> = match commit_b {
        Some(commit) => Some(commit.tree().map_err(|e| {
            Error::Corrupt(format!("commit {} has no tree: {}", commit.hash(), e))
        })?),
        None => None,
    };

    let diff = repo
        .inner()
        .diff_tree_to_tree(tree_b.as_ref(), Some(&tree_a), None)?;

    let stats = diff.stats()?;
    let stats = stats
        .to_buf(DiffStatsFormat::FULL, STATS_WIDTH)?
        .as_str()
        .unwrap_or("")
        .to_string();

    let mut patches = Vec::new();
    for (idx, delta) in diff.deltas().enumerate() {
        let text = match git2::Patch::from_diff(&diff, idx)? {
            Some(mut patch) => String::from_utf8_lossy(&patch.to_buf()?).into_owned(),
            None => String::new(), // binary delta, no textual patch
        };
        patches.push(Patch {
            old_path: delta
                .old_file()
                .path()
                .map(|p| p.to_string_lossy().into_owned()),
            new_path: delta
                .new_file()
                .path()
                .map(|p| p.to_string_lossy().into_owned()),
            text,
        });
    }

    Ok(Diff {
        commit_a: commit_a.hash(),
        commit_b: commit_b.map(|c| c.hash()),
        stats,
        patches,
    })
}
