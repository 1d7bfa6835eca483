//! The polling loop: fetch, parse, match, persist, sleep.
//!
//! One cycle runs at a time; the timer re-arms from each cycle's start, so a
//! slow cycle neither stacks delay nor overlaps the next one. Transient
//! failures cost only their own cycle. Fatal errors surface to the caller.

use crate::client::CatalogSource;
use crate::market::{matcher, snapshot, Item, StickerDirectory};
use crate::store::{FoundStore, SnapshotCache};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// What one cycle observed.
#[derive(Debug)]
pub struct CycleReport {
    pub snapshot_name: String,
    pub catalog_len: usize,
    pub newly_matched: usize,
    pub found_len: usize,
    pub completed_at: DateTime<Utc>,
}

/// Drives the periodic fetch->parse->match->persist pipeline over a catalog
/// source, owning the cumulative found-set for the process lifetime.
pub struct Watcher<C: CatalogSource> {
    source: C,
    directory: StickerDirectory,
    watch_ids: HashSet<String>,
    found: Vec<Item>,
    found_store: FoundStore,
    snapshot_cache: SnapshotCache,
    base_url: String,
    interval: Duration,
}

impl<C: CatalogSource> Watcher<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: C,
        directory: StickerDirectory,
        watch_ids: HashSet<String>,
        found_store: FoundStore,
        snapshot_cache: SnapshotCache,
        base_url: String,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            directory,
            watch_ids,
            found: Vec::new(),
            found_store,
            snapshot_cache,
            base_url,
            interval,
        }
    }

    /// Run cycles until `shutdown` fires or a fatal error surfaces.
    ///
    /// The first cycle starts immediately. Cancellation is honoured between
    /// cycles only; a cycle in flight always completes, persistence included.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.cycle().await {
                        Ok(report) => {
                            info!(
                                snapshot = %report.snapshot_name,
                                items = report.catalog_len,
                                new = report.newly_matched,
                                tracked = report.found_len,
                                "Cycle complete"
                            );
                        }
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => {
                            warn!(error = %e, "Cycle failed, retrying on next tick");
                        }
                    }
                }
                _ = shutdown.changed() => {
                    info!("Shutdown requested, stopping");
                    return Ok(());
                }
            }
        }
    }

    /// One fetch->parse->match->persist pass.
    pub async fn cycle(&mut self) -> Result<CycleReport> {
        let name = self.source.snapshot_name().await?;
        let raw = self.source.snapshot_body(&name).await?;

        if let Err(e) = self.snapshot_cache.write(&raw) {
            warn!(error = %e, "Failed to cache raw snapshot");
        }

        let catalog = snapshot::parse_snapshot(&raw, &self.base_url);

        let outcome = matcher::update(&catalog, &self.watch_ids, std::mem::take(&mut self.found));
        for item in &outcome.newly_matched {
            info!(
                name = %item.name,
                price = %item.price_display(),
                stickers = %self.directory.render_names(&item.sticker_ids),
                url = %item.url,
                "Watched sticker spotted"
            );
        }
        self.found = outcome.found;

        if let Err(e) = self.found_store.persist(&self.found) {
            warn!(error = %e, "Failed to persist found set, keeping in-memory state");
        }

        Ok(CycleReport {
            snapshot_name: name,
            catalog_len: catalog.len(),
            newly_matched: outcome.newly_matched.len(),
            found_len: self.found.len(),
            completed_at: Utc::now(),
        })
    }

    /// Currently tracked matches, in discovery order.
    pub fn found(&self) -> &[Item] {
        &self.found
    }
}
