use crate::{Result, WatchError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Path management for the watcher's data directory.
///
/// Everything the process persists lives under one root: the session cookie
/// export, the API key, the sticker directory cache, the raw snapshot cache,
/// and the found-set output.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Root data directory
    pub root: PathBuf,
}

impl DataPaths {
    /// Create a paths instance rooted at the platform data directory.
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "stickerwatch").ok_or_else(|| {
            WatchError::Config("Failed to determine platform data directory".to_string())
        })?;

        Ok(Self {
            root: dirs.data_dir().to_path_buf(),
        })
    }

    /// Create a paths instance rooted at an explicit directory.
    pub fn for_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Browser-exported session cookies
    pub fn cookies_file(&self) -> PathBuf {
        self.root.join("cookies.json")
    }

    /// Opaque marketplace API key
    pub fn api_key_file(&self) -> PathBuf {
        self.root.join("api_key.txt")
    }

    /// Cached sticker directory document
    pub fn stickers_file(&self) -> PathBuf {
        self.root.join("stickers.json")
    }

    /// Raw catalog snapshot from the last successful fetch
    pub fn snapshot_file(&self) -> PathBuf {
        self.root.join("market_items.csv")
    }

    /// Found-set output, overwritten every cycle
    pub fn found_file(&self) -> PathBuf {
        self.root.join("found_items.json")
    }

    /// Ensure the root directory exists
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}
