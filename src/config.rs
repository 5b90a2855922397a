//! Server and client configuration.
//!
//! The configuration file is a small JSON object. The server reads
//! [`SERVER_CONFIG_PATH`]; the remote-admin client reads a dotfile in the
//! user's home directory. There is no global parsed-config state: the loaded
//! `Config` is passed to the components that need it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default location of the server configuration file.
pub const SERVER_CONFIG_PATH: &str = "/etc/gitscope.conf";

/// File name of the per-user client configuration, relative to `$HOME`.
pub const CLIENT_CONFIG_FILE: &str = ".gitscoperc";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Directory under which all served repositories live.
    pub repo_root: PathBuf,

    /// Keyring used for signature verification and user resolution.
    pub public_keyring: PathBuf,

    /// Keyring holding signing keys. Only needed by the admin client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_keyring: Option<PathBuf>,
}

impl Config {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Config> {
        let data = fs::read(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_slice(&data)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the configuration back out, readable by owner only.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// Location of the per-user client configuration file.
pub fn client_config_path() -> PathBuf {
    let home = env::var_os("HOME").unwrap_or_default();
    Path::new(&home).join(CLIENT_CONFIG_FILE)
}
