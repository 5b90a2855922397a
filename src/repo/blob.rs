use std::path::Path;

use crate::user::User;

/// File content resolved from a commit's tree.
///
/// The content is held line by line, each line retaining its trailing
/// newline. Blame and highlighting both key off this split.
#[derive(Clone, Debug)]
pub struct Blob {
    /// Path of the blob within the tree it was read from.
    pub path: String,

    /// File-type tag: the extension without the dot, or `"text"` when the
    /// file has none. Fed to the highlighting service as the language hint.
    pub kind: String,

    pub lines: Vec<Vec<u8>>,
}

impl Blob {
    pub fn new(path: &str, content: &[u8]) -> Blob {
        let kind = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("text")
            .to_string();
        let lines = content
            .split_inclusive(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();
        Blob {
            path: path.to_string(),
            kind,
            lines,
        }
    }

    /// The raw content, lines rejoined.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.lines.concat()
    }
}

/// Per-line authorship for a blob as of some commit.
#[derive(Clone, Debug)]
pub struct Blame {
    pub blob: Blob,

    /// One slot per line of `blob`. `None` marks a line whose blame hunk
    /// could not be resolved, so the parallel-length invariant always holds.
    pub users: Vec<Option<User>>,
}
