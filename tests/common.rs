use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use git2::{Oid, Repository, Signature, Time};

use gitscope::keyring::{KeyEntry, Keyring};
use gitscope::repo::Repo;

/// A bare repository with a small merged history:
///
/// ```text
///   C1 <- C2 <- C3          (main)
///           \   /
///            C4             (feature)
/// ```
///
/// `C3` is a merge whose first parent is `C2` and second parent is `C4`.
/// Commit times strictly increase from `C1` to `C3`.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
    pub c1: String,
    pub c2: String,
    pub c3: String,
    pub c4: String,
}

impl Fixture {
    pub fn repo(&self) -> Repo {
        Repo::open("project", &self.path).unwrap()
    }
}

#[allow(dead_code)]
pub fn merge_fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.git");
    let repo = Repository::init_bare(&path).unwrap();
    fs::write(path.join("description"), "demo project\n").unwrap();

    let t1 = write_tree(&repo, &[("README.md", b"hello\n")]);
    let c1 = commit(&repo, t1, &[], 1_000_000, "initial commit");

    let t2 = write_tree(
        &repo,
        &[
            ("README.md", b"hello\nworld\n"),
            ("src/main.txt", b"main\n"),
        ],
    );
    let c2 = commit(&repo, t2, &[c1], 2_000_000, "add src");

    let t4 = write_tree(
        &repo,
        &[
            ("README.md", b"hello\nworld\n"),
            ("src/main.txt", b"main\n"),
            ("src/feature.txt", b"feature\n"),
        ],
    );
    let c4 = commit(&repo, t4, &[c2], 3_000_000, "add feature");

    let c3 = commit(&repo, t4, &[c2, c4], 4_000_000, "merge feature");

    repo.reference("refs/heads/main", c3, true, "").unwrap();
    repo.reference("refs/heads/feature", c4, true, "").unwrap();
    repo.set_head("refs/heads/main").unwrap();

    Fixture {
        dir,
        path,
        c1: c1.to_string(),
        c2: c2.to_string(),
        c3: c3.to_string(),
        c4: c4.to_string(),
    }
}

/// Write a tree from `(path, content)` pairs. One directory level deep at
/// most, which is all the fixtures need.
fn write_tree(repo: &Repository, files: &[(&str, &[u8])]) -> Oid {
    let mut root = repo.treebuilder(None).unwrap();
    let mut dirs: BTreeMap<&str, Vec<(&str, Oid)>> = BTreeMap::new();

    for (path, content) in files {
        let blob = repo.blob(content).unwrap();
        match path.find('/') {
            Some(idx) => dirs
                .entry(&path[..idx])
                .or_default()
                .push((&path[idx + 1..], blob)),
            None => {
                root.insert(path, blob, 0o100644).unwrap();
            }
        }
    }

    for (dir, entries) in dirs {
        let mut sub = repo.treebuilder(None).unwrap();
        for (name, blob) in entries {
            sub.insert(name, blob, 0o100644).unwrap();
        }
        let sub = sub.write().unwrap();
        root.insert(dir, sub, 0o040000).unwrap();
    }

    root.write().unwrap()
}

fn commit(repo: &Repository, tree: Oid, parents: &[Oid], secs: i64, message: &str) -> Oid {
    let tree = repo.find_tree(tree).unwrap();
    let parents: Vec<_> = parents
        .iter()
        .map(|&id| repo.find_commit(id).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

    let sig = Signature::new("Alice", "alice@example.com", &Time::new(secs, 0)).unwrap();
    repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// A public keyring whose single entry matches the fixture's committer.
#[allow(dead_code)]
pub fn alice_keyring() -> Keyring {
    Keyring {
        entries: vec![KeyEntry::generate("Alice <alice@example.com>")],
    }
}
