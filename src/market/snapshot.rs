//! Catalog snapshot parsing.
//!
//! The item database arrives as a header row plus one line per listing. Each
//! line's payload is a single `;`-delimited field; sticker ids nest one level
//! deeper, `|`-joined. Column positions are fixed by the upstream export.

use crate::market::item::Item;
use tracing::{debug, warn};

const COL_CLASS_ID: usize = 0;
const COL_INSTANCE_ID: usize = 1;
const COL_PRICE: usize = 2;
const COL_AVAILABLE: usize = 3;
const COL_QUALITY: usize = 6;
const COL_STICKER_IDS: usize = 9;
const COL_NAME: usize = 10;
const COL_HASH_NAME: usize = 12;

/// A row must carry at least the mandatory prefix through the quality column.
const MIN_FIELDS: usize = 7;

/// Parse a raw snapshot into item records.
///
/// Row order is preserved and duplicates pass through unchanged; matching
/// de-duplicates later. Malformed rows are skipped, never aborting the rest
/// of the snapshot, so minor upstream format drift costs single rows only.
/// A snapshot that parses to zero rows is not an error here.
pub fn parse_snapshot(raw: &str, base_url: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut skipped = 0usize;

    // First line is the header.
    for (line_no, line) in raw.lines().enumerate().skip(1) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        match parse_row(line, base_url) {
            Some(item) => items.push(item),
            None => {
                debug!(line = line_no + 1, "Skipping malformed snapshot row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, parsed = items.len(), "Snapshot contained malformed rows");
    }

    items
}

fn parse_row(line: &str, base_url: &str) -> Option<Item> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let class_id = fields[COL_CLASS_ID].to_string();
    let instance_id = fields[COL_INSTANCE_ID].to_string();
    let price = fields[COL_PRICE].parse::<u64>().ok()?;
    let available_count = fields[COL_AVAILABLE].parse::<u32>().ok()?;

    let sticker_ids = fields
        .get(COL_STICKER_IDS)
        .map(|raw| split_sticker_ids(raw))
        .unwrap_or_default();

    let url = Item::listing_url(base_url, &class_id, &instance_id);

    Some(Item {
        class_id,
        instance_id,
        price,
        available_count,
        quality: fields[COL_QUALITY].to_string(),
        sticker_ids,
        name: fields.get(COL_NAME).unwrap_or(&"").to_string(),
        hash_name: fields.get(COL_HASH_NAME).unwrap_or(&"").to_string(),
        url,
    })
}

/// Sticker ids are `|`-joined; trailing empty entries are ignored.
fn split_sticker_ids(raw: &str) -> Vec<String> {
    raw.split('|')
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .collect()
}
