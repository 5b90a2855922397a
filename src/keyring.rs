//! Keyring files.
//!
//! A keyring is a JSON array of key entries, each binding an ed25519 key to
//! an identity string of the form `"Display Name <email>"`. The public
//! keyring carries verification keys only; the private keyring additionally
//! carries the secret halves and should never leave the signing host.

use std::convert::TryInto;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::Arc;
use std::time::SystemTime;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One key in a keyring.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KeyEntry {
    /// Identity string, `"Display Name <email>"`.
    pub identity: String,

    /// Base64-encoded ed25519 verification key.
    pub public_key: String,

    /// Base64-encoded ed25519 secret key. Present in private keyrings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

impl KeyEntry {
    /// Generate a fresh keypair bound to `identity`.
    pub fn generate(identity: &str) -> KeyEntry {
        let signing = SigningKey::generate(&mut OsRng);
        KeyEntry {
            identity: identity.to_string(),
            public_key: BASE64.encode(signing.verifying_key().to_bytes()),
            secret_key: Some(BASE64.encode(signing.to_bytes())),
        }
    }

    /// Decode the verification key.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        let bytes = decode_key(&self.identity, &self.public_key)?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|e| Error::Config(format!("bad public key for {}: {}", self.identity, e)))
    }

    /// Decode the signing key. Fails on public-only entries.
    pub fn signing_key(&self) -> Result<SigningKey> {
        let secret = self
            .secret_key
            .as_ref()
            .ok_or_else(|| Error::Config(format!("no secret key for {}", self.identity)))?;
        let bytes = decode_key(&self.identity, secret)?;
        Ok(SigningKey::from_bytes(&bytes))
    }

    /// A copy of this entry with the secret half stripped, suitable for
    /// publishing in a public keyring.
    pub fn public_entry(&self) -> KeyEntry {
        KeyEntry {
            identity: self.identity.clone(),
            public_key: self.public_key.clone(),
            secret_key: None,
        }
    }
}

fn decode_key(identity: &str, encoded: &str) -> Result<[u8; 32]> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| Error::Config(format!("bad key encoding for {}: {}", identity, e)))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::Config(format!("wrong key length for {}", identity)))
}

/// An ordered collection of key entries.
///
/// Order matters: signing uses the first private entry, and user resolution
/// lets later entries shadow earlier ones with the same email.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Keyring {
    pub entries: Vec<KeyEntry>,
}

impl Keyring {
    /// Parse a keyring file.
    pub fn load(path: &Path) -> Result<Keyring> {
        let data = fs::read(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_slice(&data)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the keyring out, readable by owner only on Unix.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data =
            serde_json::to_vec_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, data)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    /// The entry used for signing: the first one in keyring order.
    pub fn first(&self) -> Option<&KeyEntry> {
        self.entries.first()
    }
}

/// A keyring handle that re-reads its backing file only when the file's
/// modification time changes.
pub struct CachedKeyring {
    path: PathBuf,
    state: Mutex<Option<(SystemTime, Arc<Keyring>)>>,
}

impl CachedKeyring {
    pub fn new(path: PathBuf) -> CachedKeyring {
        CachedKeyring {
            path,
            state: Mutex::new(None),
        }
    }

    /// The current keyring contents, reloading if the file changed on disk.
    pub fn load(&self) -> Result<Arc<Keyring>> {
        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| Error::Config(format!("{}: {}", self.path.display(), e)))?;

        let mut state = self.state.lock().unwrap();
        if let Some((cached_at, keyring)) = state.as_ref() {
            if *cached_at == modified {
                return Ok(Arc::clone(keyring));
            }
        }

        let keyring = Arc::new(Keyring::load(&self.path)?);
        *state = Some((modified, Arc::clone(&keyring)));
        Ok(keyring)
    }
}
