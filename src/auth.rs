//! Detached-signature authorization for remote administration.
//!
//! Privileged operations (create/delete repository) carry no session state.
//! The client signs the request payload with its private keyring; the server
//! verifies the detached signature against its public keyring.
//!
//! The signed message is the canonical JSON serialization of the payload.
//! Payloads are held as [`serde_json::Value`], whose objects are
//! BTreeMap-backed: keys serialize in sorted order, so the bytes verified on
//! the server are identical to the bytes signed on the client no matter what
//! key order the envelope arrived in.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ed25519_dalek::{Signature, Signer, Verifier};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::keyring::Keyring;

/// The signed request envelope.
///
/// Wire format: `{"Signature": "<base64>", "Data": {...}}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthRequest {
    #[serde(rename = "Signature")]
    pub signature: String,

    #[serde(rename = "Data")]
    pub data: Value,
}

impl AuthRequest {
    /// Sign `data` with the first entry of the private keyring.
    pub fn create(data: Value, private_keyring: &Keyring) -> Result<AuthRequest> {
        let entry = private_keyring
            .first()
            .ok_or_else(|| Error::Config("private keyring is empty".to_string()))?;
        let signing_key = entry.signing_key()?;

        let message = canonical_bytes(&data)?;
        let signature = signing_key.sign(&message);

        Ok(AuthRequest {
            signature: BASE64.encode(signature.to_bytes()),
            data,
        })
    }

    /// Check the detached signature against the public keyring.
    ///
    /// Fails closed: a missing payload, malformed signature, unreadable
    /// key, or mismatch all surface as the same opaque
    /// [`Error::Unauthorized`].
    pub fn verify(&self, public_keyring: &Keyring) -> Result<()> {
        if self.data.is_null() || self.signature.is_empty() {
            return Err(Error::Unauthorized);
        }

        let signature = BASE64
            .decode(&self.signature)
            .ok()
            .and_then(|bytes| Signature::from_slice(&bytes).ok())
            .ok_or(Error::Unauthorized)?;

        let message = canonical_bytes(&self.data).map_err(|_| Error::Unauthorized)?;

        for entry in &public_keyring.entries {
            if let Ok(key) = entry.verifying_key() {
                if key.verify(&message, &signature).is_ok() {
                    return Ok(());
                }
            }
        }
        Err(Error::Unauthorized)
    }
}

/// Canonical serialization of a payload: sorted-key JSON.
fn canonical_bytes(data: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(data).map_err(|e| Error::BadRequest(e.to_string()))
}
