//! Durable cycle outputs.
//!
//! Every write here is a whole-file overwrite, so each file always reflects
//! exactly the latest cycle and a reader needs no reconciliation. The
//! in-memory state stays authoritative; persistence failures are reported by
//! the caller and never roll anything back.

use crate::market::Item;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists the found-set as a JSON array of items.
#[derive(Debug, Clone)]
pub struct FoundStore {
    path: PathBuf,
}

impl FoundStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn persist(&self, found: &[Item]) -> Result<()> {
        let content = serde_json::to_string_pretty(found)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Keeps the raw snapshot blob from the last successful fetch, so the
/// catalog the watcher last saw is inspectable offline.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn write(&self, raw: &str) -> Result<()> {
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Cache of the sticker directory document.
#[derive(Debug, Clone)]
pub struct StickerCache {
    path: PathBuf,
}

impl StickerCache {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn write(&self, document: &serde_json::Value) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn item(class_id: &str) -> Item {
        Item {
            class_id: class_id.to_string(),
            instance_id: "1".to_string(),
            price: 9900,
            available_count: 2,
            quality: "MW".to_string(),
            sticker_ids: vec!["10".to_string()],
            name: "Stored Item".to_string(),
            hash_name: String::new(),
            url: "https://market.test/item/A-1".to_string(),
        }
    }

    #[test]
    fn persist_overwrites_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = FoundStore::new(&dir.path().join("found_items.json"));

        store.persist(&[item("A"), item("B")]).unwrap();
        store.persist(&[item("C")]).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let read: Vec<Item> = serde_json::from_str(&raw).unwrap();
        assert_eq!(read, vec![item("C")]);
    }

    #[test]
    fn persist_empty_set_writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let store = FoundStore::new(&dir.path().join("found_items.json"));

        store.persist(&[]).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let read: Vec<Item> = serde_json::from_str(&raw).unwrap();
        assert!(read.is_empty());
    }

    #[test]
    fn snapshot_cache_overwrites() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(&dir.path().join("market_items.csv"));

        cache.write("header\nrow1\n").unwrap();
        cache.write("header\nrow2\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("market_items.csv")).unwrap(),
            "header\nrow2\n"
        );
    }

    #[test]
    fn sticker_cache_round_trips_document() {
        let dir = TempDir::new().unwrap();
        let cache = StickerCache::new(&dir.path().join("stickers.json"));
        let doc = serde_json::json!({"stickers": [{"id": 1, "name": "One"}]});

        cache.write(&doc).unwrap();

        let raw = std::fs::read_to_string(cache.path()).unwrap();
        let read: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(read, doc);
    }
}
