use git2::Oid;

use crate::paths::{join_segments, CanonicalPath};

/// A named pointer into the object store (a branch head).
///
/// Refs are derived on demand from a ref name and never cached.
pub struct Ref<'repo> {
    inner: git2::Reference<'repo>,
}

impl std::fmt::Debug for Ref<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ref").field("name", &self.name()).finish()
    }
}

impl<'repo> Ref<'repo> {
    pub(crate) fn new(inner: git2::Reference<'repo>) -> Ref<'repo> {
        Ref { inner }
    }

    /// Full ref name, e.g. `refs/heads/main`. Empty for non-UTF-8 names.
    pub fn name(&self) -> &str {
        self.inner.name().unwrap_or("")
    }

    /// The leaf component of the ref name, namespace prefix stripped.
    pub fn nice_name(&self) -> &str {
        self.name().rsplit('/').next().unwrap_or("")
    }

    /// Object id this ref points at directly.
    pub fn target(&self) -> Option<Oid> {
        self.inner.target()
    }

    pub(crate) fn inner(&self) -> &git2::Reference<'repo> {
        &self.inner
    }
}

impl CanonicalPath for Ref<'_> {
    fn canonical_path(&self) -> String {
        join_segments(&[self.nice_name(), "commits"])
    }
}
