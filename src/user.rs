//! User resolution against the public keyring.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ed25519_dalek::VerifyingKey;
use log::warn;

use crate::keyring::Keyring;
use crate::paths::CanonicalPath;

/// A person known to the public keyring.
#[derive(Clone, Debug)]
pub struct User {
    pub name: String,
    pub email: String,
    public_key: VerifyingKey,
}

impl User {
    pub fn public_key(&self) -> &VerifyingKey {
        &self.public_key
    }

    /// The verification key in transportable form.
    pub fn encoded_public_key(&self) -> String {
        BASE64.encode(self.public_key.to_bytes())
    }

    /// The identity string this user was loaded from.
    pub fn identity(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

impl CanonicalPath for User {
    fn canonical_path(&self) -> String {
        format!("/user/{}", self.email)
    }
}

/// Email-indexed view of a public keyring.
///
/// The index is built once per keyring load rather than re-scanning the
/// keyring on every lookup. When two entries carry the same email, the later
/// one in keyring order wins.
#[derive(Debug, Default)]
pub struct UserDirectory {
    index: HashMap<String, User>,
}

impl UserDirectory {
    /// A directory that resolves nobody. Commit attribution degrades to
    /// "author unknown".
    pub fn empty() -> UserDirectory {
        UserDirectory::default()
    }

    pub fn from_keyring(keyring: &Keyring) -> UserDirectory {
        let mut index = HashMap::new();

        for entry in &keyring.entries {
            let (name, email) = match split_identity(&entry.identity) {
                Some(parts) => parts,
                None => {
                    warn!("skipping malformed identity {:?}", entry.identity);
                    continue;
                }
            };
            let public_key = match entry.verifying_key() {
                Ok(key) => key,
                Err(e) => {
                    warn!("skipping key entry {:?}: {}", entry.identity, e);
                    continue;
                }
            };
            index.insert(
                email.to_string(),
                User {
                    name: name.to_string(),
                    email: email.to_string(),
                    public_key,
                },
            );
        }

        UserDirectory { index }
    }

    /// Look a user up by exact email match.
    pub fn resolve(&self, email: &str) -> Option<User> {
        self.index.get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Split `"Display Name <email>"` into its two parts.
fn split_identity(identity: &str) -> Option<(&str, &str)> {
    let open = identity.find('<')?;
    let rest = &identity[open + 1..];
    let close = rest.find('>')?;
    let name = identity[..open].trim();
    let email = &rest[..close];
    if email.is_empty() {
        return None;
    }
    Some((name, email))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::keyring::KeyEntry;

    fn ring(identities: &[&str]) -> Keyring {
        Keyring {
            entries: identities.iter().map(|i| KeyEntry::generate(i)).collect(),
        }
    }

    #[test]
    fn resolve_by_email() {
        let keyring = ring(&["Alice <alice@example.com>", "Bob <bob@example.com>"]);
        let users = UserDirectory::from_keyring(&keyring);

        let alice = users.resolve("alice@example.com").unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.email, "alice@example.com");
        assert_eq!(alice.identity(), "Alice <alice@example.com>");

        assert!(users.resolve("carol@example.com").is_none());
    }

    #[test]
    fn later_entry_wins_on_duplicate_email() {
        let keyring = ring(&["Old Name <dup@example.com>", "New Name <dup@example.com>"]);
        let users = UserDirectory::from_keyring(&keyring);

        assert_eq!(users.len(), 1);
        assert_eq!(users.resolve("dup@example.com").unwrap().name, "New Name");
    }

    #[test]
    fn malformed_identities_are_skipped() {
        let keyring = ring(&["no brackets here", "Fine <fine@example.com>", "<>"]);
        let users = UserDirectory::from_keyring(&keyring);

        assert_eq!(users.len(), 1);
        assert!(users.resolve("fine@example.com").is_some());
    }

    #[test]
    fn encoded_public_key_matches_keyring() {
        let keyring = ring(&["Alice <alice@example.com>"]);
        let users = UserDirectory::from_keyring(&keyring);

        let alice = users.resolve("alice@example.com").unwrap();
        assert_eq!(alice.encoded_public_key(), keyring.entries[0].public_key);
    }

    #[test]
    fn split_identity_parsing() {
        assert_eq!(
            split_identity("A B <a@b.c>"),
            Some(("A B", "a@b.c"))
        );
        assert_eq!(split_identity("<a@b.c>"), Some(("", "a@b.c")));
        assert_eq!(split_identity("nope"), None);
        assert_eq!(split_identity("empty <>"), None);
    }
}
