mod common;

use gitscope::paths::CanonicalPath;
use gitscope::repo::EntryKind;
use gitscope::user::UserDirectory;
use gitscope::Error;

#[test]
fn root_listing_has_no_parent_entry() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();
    let users = UserDirectory::empty();
    let commit = repo.lookup_commit(&fixture.c3, &users).unwrap();

    for root in &["", "/"] {
        let entries = repo.file_tree(&commit, root).unwrap();
        assert!(entries.iter().all(|e| !e.is_parent_link()));

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["README.md", "src"]);
        assert_eq!(entries[0].kind, EntryKind::Blob);
        assert_eq!(entries[1].kind, EntryKind::Tree);
    }
}

#[test]
fn subtree_listing_starts_with_parent_entry() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();
    let users = UserDirectory::empty();
    let commit = repo.lookup_commit(&fixture.c3, &users).unwrap();

    let entries = repo.file_tree(&commit, "src").unwrap();

    assert!(entries[0].is_parent_link());
    assert_eq!(entries[0].dir_path, "");
    assert_eq!(entries[0].canonical_path(), "tree");

    let names: Vec<&str> = entries[1..].iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["feature.txt", "main.txt"]);
    assert!(entries[1..].iter().all(|e| e.dir_path == "src"));
    assert_eq!(entries[1].canonical_path(), "blob/src/feature.txt");
}

#[test]
fn listing_a_file_or_missing_path_fails_cleanly() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();
    let users = UserDirectory::empty();
    let commit = repo.lookup_commit(&fixture.c3, &users).unwrap();

    match repo.file_tree(&commit, "README.md").unwrap_err() {
        Error::BadRequest(msg) => assert!(msg.contains("not a directory")),
        other => panic!("unexpected error: {:?}", other),
    }

    assert!(matches!(
        repo.file_tree(&commit, "no/such/dir").unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn read_blob_splits_lines_with_newlines_kept() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();
    let users = UserDirectory::empty();
    let commit = repo.lookup_commit(&fixture.c2, &users).unwrap();

    let blob = repo.read_blob(&commit, "README.md").unwrap();
    assert_eq!(blob.kind, "md");
    assert_eq!(blob.lines, vec![b"hello\n".to_vec(), b"world\n".to_vec()]);
    assert_eq!(blob.as_bytes(), b"hello\nworld\n");

    assert!(matches!(
        repo.read_blob(&commit, "src").unwrap_err(),
        Error::NotFound(_)
    ));
    assert!(matches!(
        repo.read_blob(&commit, "nope").unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn blame_attribution_is_parallel_to_the_lines() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();

    let keyring = common::alice_keyring();
    let users = UserDirectory::from_keyring(&keyring);
    let commit = repo.lookup_commit(&fixture.c2, &users).unwrap();

    let blame = repo.read_blob_blame(&commit, "README.md", &users).unwrap();
    assert_eq!(blame.users.len(), blame.blob.lines.len());
    assert!(blame
        .users
        .iter()
        .all(|u| u.as_ref().map(|u| u.email.as_str()) == Some("alice@example.com")));
}

#[test]
fn blame_keeps_slots_for_unresolved_lines() {
    let fixture = common::merge_fixture();
    let repo = fixture.repo();

    // Nobody in the directory, so every line stays a hole.
    let users = UserDirectory::empty();
    let commit = repo.lookup_commit(&fixture.c2, &users).unwrap();

    let blame = repo.read_blob_blame(&commit, "README.md", &users).unwrap();
    assert_eq!(blame.users.len(), blame.blob.lines.len());
    assert!(blame.users.iter().all(|u| u.is_none()));
}
