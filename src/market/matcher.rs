//! The match/de-duplication pass over one catalog snapshot.
//!
//! Pure function over explicit state: the caller owns the found-set and
//! threads it through every cycle, which keeps the accumulation testable
//! without a running loop and leaves fan-in over concatenated catalogs open.

use crate::market::item::{Item, ItemId};
use std::collections::HashSet;

/// Result of one matching pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Items matched for the first time this cycle, in catalog encounter order
    pub newly_matched: Vec<Item>,
    /// The full found-set after pruning and appending, in discovery order
    pub found: Vec<Item>,
}

/// Fold one catalog snapshot into the found-set.
///
/// An item qualifies when any of its sticker ids intersects `watch_ids` and
/// its identity is not already in `previous_found`. Entries of
/// `previous_found` whose identity is no longer listed are pruned: the set
/// tracks currently-listed matches ever seen, not a permanent history. An
/// empty catalog therefore resets the found-set entirely. When the catalog
/// repeats an identity, only the first occurrence is eligible.
pub fn update(
    catalog: &[Item],
    watch_ids: &HashSet<String>,
    previous_found: Vec<Item>,
) -> MatchOutcome {
    let listed: HashSet<ItemId> = catalog.iter().map(Item::identity).collect();

    let mut found: Vec<Item> = previous_found
        .into_iter()
        .filter(|item| listed.contains(&item.identity()))
        .collect();

    let mut known: HashSet<ItemId> = found.iter().map(Item::identity).collect();

    let mut newly_matched = Vec::new();
    for item in catalog {
        if !item.sticker_ids.iter().any(|id| watch_ids.contains(id)) {
            continue;
        }
        if known.insert(item.identity()) {
            newly_matched.push(item.clone());
        }
    }

    found.extend(newly_matched.iter().cloned());

    MatchOutcome {
        newly_matched,
        found,
    }
}
