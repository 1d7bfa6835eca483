//! Catalog domain: item records, snapshot parsing, the sticker directory,
//! watch-list resolution, and the match/de-duplication pass.

pub mod item;
pub mod matcher;
pub mod snapshot;
pub mod stickers;
pub mod watchlist;

pub use item::{Item, ItemId};
pub use matcher::MatchOutcome;
pub use stickers::StickerDirectory;
