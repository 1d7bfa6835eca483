//! The sticker directory: the marketplace's full id<->name mapping.
//!
//! Items reference stickers by id, users write watch-lists by name, so both
//! lookup directions are needed. The directory is a point-in-time snapshot
//! fetched once at startup (or on an explicit refresh) and read-only after.

use crate::{Result, WatchError};
use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One directory entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Sticker {
    /// Stable identifier; arrives as a JSON number or string, normalised here
    #[serde(deserialize_with = "de_id_string")]
    pub id: String,
    /// Display name; not guaranteed unique, treated as such for lookup
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct StickerDocument {
    stickers: Vec<Sticker>,
}

/// Id<->name mapping over every sticker the marketplace knows about.
#[derive(Debug, Clone)]
pub struct StickerDirectory {
    entries: Vec<Sticker>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl StickerDirectory {
    /// Build a directory from the `{"stickers": [...]}` document.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: StickerDocument = serde_json::from_value(value)
            .map_err(|e| WatchError::Directory(format!("Malformed sticker document: {}", e)))?;
        Ok(Self::from_entries(doc.stickers))
    }

    /// Build a directory from raw JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Load a directory from a cached document on disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            WatchError::Directory(format!(
                "Failed to read sticker cache {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    fn from_entries(entries: Vec<Sticker>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, sticker) in entries.iter().enumerate() {
            // First occurrence wins when a name repeats.
            by_name.entry(sticker.name.clone()).or_insert(idx);
            by_id.entry(sticker.id.clone()).or_insert(idx);
        }
        Self {
            entries,
            by_name,
            by_id,
        }
    }

    /// Exact-match lookup of names to ids. Names with no directory entry are
    /// dropped silently; that is the documented policy, not an error.
    pub fn resolve_names(&self, names: &[String]) -> HashSet<String> {
        names
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .map(|&idx| self.entries[idx].id.clone())
            .collect()
    }

    /// Render ids back to names, unknown ids dropped silently. Output order
    /// is stable for a fixed input set: directory insertion order.
    pub fn resolve_ids(&self, ids: &[String]) -> Vec<String> {
        let mut indices: Vec<usize> = ids
            .iter()
            .filter_map(|id| self.by_id.get(id).copied())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .map(|idx| self.entries[idx].name.clone())
            .collect()
    }

    /// Human-readable sticker list for an item's ids.
    pub fn render_names(&self, ids: &[String]) -> String {
        self.resolve_ids(ids).join(", ")
    }

    pub fn get_name(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(|&idx| self.entries[idx].name.as_str())
    }

    pub fn get_id(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|&idx| self.entries[idx].id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn de_id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Value {
        Str(String),
        U64(u64),
        I64(i64),
    }

    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Str(s) => s,
        Value::U64(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
    })
}
