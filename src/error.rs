use thiserror::Error;

/// Describes the error conditions that can arise from gitscope operations.
///
/// Every variant is recoverable: a failing lookup or a corrupt tree fails the
/// current operation only, never the process. The transport layer is expected
/// to map variants onto status codes via [`Error::status`].
#[derive(Debug, Error)]
pub enum Error {
    /// A repository, ref, commit, path, or user does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Signature verification failed.
    ///
    /// Deliberately opaque: callers cannot distinguish a bad signature from a
    /// missing key or an unreadable keyring.
    #[error("unauthorized")]
    Unauthorized,

    /// Malformed caller input, including repository names that would escape
    /// the configured repository root.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The target of a create operation already exists.
    #[error("{0} already exists")]
    Conflict(String),

    /// The object database contains something structurally impossible, such
    /// as a tree entry whose resolved object has the wrong type.
    #[error("repository corrupt: {0}")]
    Corrupt(String),

    /// Configuration or keyring files are missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Git(#[from] git2::Error),
}

impl Error {
    /// The HTTP-equivalent status for this error.
    pub fn status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Unauthorized => 401,
            Error::BadRequest(_) => 400,
            Error::Conflict(_) => 409,
            _ => 500,
        }
    }
}

/// A specialized `Result` type for gitscope operations.
pub type Result<T> = std::result::Result<T, Error>;
