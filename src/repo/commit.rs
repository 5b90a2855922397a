use git2::Oid;

use crate::paths::{join_segments, CanonicalPath};
use crate::user::{User, UserDirectory};

/// A commit together with its committer resolved against the public keyring.
///
/// Resolution happens once, when the commit is constructed for a request;
/// nothing here is persisted.
#[derive(Debug)]
pub struct Commit<'repo> {
    inner: git2::Commit<'repo>,
    author: Option<User>,
}

impl<'repo> Commit<'repo> {
    pub(crate) fn new(inner: git2::Commit<'repo>, users: &UserDirectory) -> Commit<'repo> {
        let author = inner
            .committer()
            .email()
            .and_then(|email| users.resolve(email));
        Commit { inner, author }
    }

    /// Canonical object id as lowercase hex.
    pub fn hash(&self) -> String {
        self.inner.id().to_string()
    }

    pub fn id(&self) -> Oid {
        self.inner.id()
    }

    /// Committer timestamp, seconds since the Unix epoch.
    pub fn date(&self) -> i64 {
        self.inner.committer().when().seconds()
    }

    /// First line of the commit message, if valid UTF-8.
    pub fn summary(&self) -> Option<&str> {
        self.inner.summary()
    }

    pub fn message(&self) -> Option<&str> {
        self.inner.message()
    }

    /// The committer as a keyring user, when one matched.
    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    /// Committer email as recorded in the commit itself.
    pub fn committer_email(&self) -> Option<String> {
        self.inner.committer().email().map(|e| e.to_string())
    }

    pub fn parent_count(&self) -> usize {
        self.inner.parent_count()
    }

    pub fn parent_ids(&self) -> impl Iterator<Item = Oid> + '_ {
        self.inner.parent_ids()
    }

    pub fn tree(&self) -> Result<git2::Tree<'repo>, git2::Error> {
        self.inner.tree()
    }

    pub(crate) fn inner(&self) -> &git2::Commit<'repo> {
        &self.inner
    }
}

impl CanonicalPath for Commit<'_> {
    fn canonical_path(&self) -> String {
        join_segments(&["commit", &self.hash()])
    }
}
