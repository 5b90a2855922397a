//! The set of repositories served from the configured root directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::admin::resolve_repo_path;
use crate::error::{Error, Result};
use crate::repo::Repo;

/// Names of the repositories found under one root directory.
///
/// libgit2 repository handles are not safe to share across threads, so the
/// registry keeps only names and opens a fresh read handle per request.
/// Every directory is opened once during [`Registry::scan`]; a root that
/// contains a non-repository directory fails the scan, which is a startup
/// error for the process.
pub struct Registry {
    root: PathBuf,
    names: Vec<String>,
}

impl Registry {
    /// Enumerate and validate the repositories under `root`.
    pub fn scan(root: &Path) -> Result<Registry> {
        let mut names = Vec::new();

        let mut entries: Vec<_> = fs::read_dir(root)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|e| e.path().is_dir())
            .collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            info!("loading repository from {}", path.display());
            Repo::open(&name, &path)?;
            names.push(name);
        }

        Ok(Registry {
            root: root.to_path_buf(),
            names,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Repository names, sorted.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Open a read handle for one request.
    pub fn open(&self, name: &str) -> Result<Repo> {
        if !self.names.iter().any(|n| n == name) {
            return Err(Error::NotFound(format!("repository {}", name)));
        }
        let path = resolve_repo_path(&self.root, name)?;
        Repo::open(name, &path)
    }

    /// Re-enumerate after a create or delete.
    pub fn rescan(&mut self) -> Result<()> {
        *self = Registry::scan(&self.root)?;
        Ok(())
    }
}
