//! Repository administration: create and delete.
//!
//! Both operations run only after a signed request has verified
//! (see [`crate::auth`]). They are single irreversible filesystem
//! operations; there is no rollback.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::info;

use crate::error::{Error, Result};

/// Resolve a repository name inside `root`, rejecting anything that would
/// escape it after path cleaning (`..`, absolute paths, empty names).
pub fn resolve_repo_path(root: &Path, name: &str) -> Result<PathBuf> {
    if name.is_empty() {
        return Err(Error::BadRequest("empty repository name".to_string()));
    }

    let mut cleaned = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => cleaned.push(part),
            Component::CurDir => {}
            _ => {
                return Err(Error::BadRequest(format!(
                    "repository name {:?} escapes the repository root",
                    name
                )))
            }
        }
    }
    if cleaned.as_os_str().is_empty() {
        return Err(Error::BadRequest("empty repository name".to_string()));
    }

    let path = root.join(cleaned);
    if !path.starts_with(root) {
        return Err(Error::BadRequest(format!(
            "repository name {:?} escapes the repository root",
            name
        )));
    }
    Ok(path)
}

/// Initialize a new bare repository named `name` under `root`.
pub fn create_repository(root: &Path, name: &str) -> Result<PathBuf> {
    let path = resolve_repo_path(root, name)?;
    if path.exists() {
        return Err(Error::Conflict(format!("repository {}", name)));
    }

    git2::Repository::init_bare(&path)?;
    info!("created repository {} at {}", name, path.display());
    Ok(path)
}

/// Remove the repository named `name` from `root`.
///
/// Refuses to act when the resolved path is the repository root or the
/// filesystem root: a misconfigured root must never make this recursive
/// delete reach outside one repository directory.
pub fn delete_repository(root: &Path, name: &str) -> Result<()> {
    let path = resolve_repo_path(root, name)?;

    if path == root || path == Path::new("/") {
        return Err(Error::BadRequest(format!(
            "refusing to delete {}",
            path.display()
        )));
    }
    if !path.exists() {
        return Err(Error::NotFound(format!("repository {}", name)));
    }

    fs::remove_dir_all(&path)?;
    info!("deleted repository {} at {}", name, path.display());
    Ok(())
}
