//! Canonical browse paths for domain entities.

/// A single capability every linkable entity implements.
///
/// [`crate::repo::Repo`] and [`crate::user::User`] return absolute paths;
/// commits, refs, and tree entries return paths relative to their
/// repository's path, to be joined by the caller.
pub trait CanonicalPath {
    fn canonical_path(&self) -> String;
}

/// Join path segments with `/`, skipping empty ones.
pub(crate) fn join_segments(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_empty_segments() {
        assert_eq!(join_segments(&["tree", "", "src"]), "tree/src");
        assert_eq!(join_segments(&["blob", "src", "main.rs"]), "blob/src/main.rs");
        assert_eq!(join_segments(&[]), "");
    }
}
