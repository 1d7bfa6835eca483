//! Marketplace API key storage.
//!
//! The key is an opaque account-bound token created through the site's docs
//! page; obtaining one is outside this process. It is read once and reused
//! for the whole run, since requesting a fresh key would invalidate it.

use crate::{Result, WatchError};
use std::path::{Path, PathBuf};

/// File-backed API key store.
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    path: PathBuf,
}

impl ApiKeyStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read the stored key. A missing or blank file means the account has no
    /// provisioned key, which the process cannot fix on its own.
    pub fn load(&self) -> Result<String> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            WatchError::Auth(format!(
                "No API key at {} ({}); create one on the marketplace docs page",
                self.path.display(),
                e
            ))
        })?;

        let key = raw.trim().to_string();
        if key.is_empty() {
            return Err(WatchError::Auth(format!(
                "API key file {} is empty",
                self.path.display()
            )));
        }
        Ok(key)
    }
}
