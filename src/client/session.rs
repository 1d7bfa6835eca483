//! Session cookies.
//!
//! Logging in happens in a browser; the watcher only consumes the exported
//! cookie jar and folds it into a `Cookie` header. A missing or empty export
//! means there is no valid session, which the process cannot recover from.

use crate::{Result, WatchError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supplies the `Cookie` header for marketplace requests.
pub trait SessionProvider {
    fn cookie_header(&self) -> Result<String>;
}

/// One record of a browser cookie export; extra fields are ignored.
#[derive(Debug, Deserialize)]
struct CookieRecord {
    name: String,
    value: String,
}

/// Session provider backed by a `cookies.json` browser export.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SessionProvider for FileSession {
    fn cookie_header(&self) -> Result<String> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            WatchError::Auth(format!(
                "No session cookies at {} ({}); export a logged-in browser session first",
                self.path.display(),
                e
            ))
        })?;

        let records: Vec<CookieRecord> = serde_json::from_str(&raw).map_err(|e| {
            WatchError::Auth(format!(
                "Malformed cookie export {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if records.is_empty() {
            return Err(WatchError::Auth(format!(
                "Cookie export {} is empty",
                self.path.display()
            )));
        }

        let header = records
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        Ok(header)
    }
}
