use super::{data_paths, CommandHandler};
use crate::client::{ApiKeyStore, FileSession, MarketClient, SessionProvider, StickerSource};
use crate::config::loader;
use crate::market::{watchlist, StickerDirectory};
use crate::store::{FoundStore, SnapshotCache, StickerCache};
use crate::watcher::Watcher;
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Handler for the `watch` command: bootstraps the pipeline, then polls
/// until interrupted (or for a single cycle with `--once`).
pub struct WatchCommand {
    pub config: String,
    pub data_dir: Option<String>,
    pub watchlist: Option<String>,
    pub interval: Option<u64>,
    pub once: bool,
}

impl CommandHandler for WatchCommand {
    async fn execute(&self) -> Result<()> {
        let mut config = loader::load_config(&self.config)?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = &self.watchlist {
            config.watchlist = PathBuf::from(path);
        }
        if let Some(secs) = self.interval {
            config.poll_interval_secs = secs;
        }

        let paths = data_paths(&config)?;

        // Fail on a dead session now, before the first cycle fetches anything.
        let session = FileSession::new(&paths.cookies_file());
        session.cookie_header()?;

        let api_key = ApiKeyStore::new(&paths.api_key_file()).load()?;
        let base_url = config.base_url.clone();
        let interval = Duration::from_secs(config.poll_interval_secs);
        let watchlist_path = config.watchlist.clone();
        let client = MarketClient::new(config, session, api_key)?;

        let sticker_cache = StickerCache::new(&paths.stickers_file());
        let directory = load_directory(&client, &sticker_cache).await?;
        info!(stickers = directory.len(), "Sticker directory ready");

        let names = watchlist::load_watchlist(&watchlist_path)?;
        let watch_ids = watchlist::resolve(&names, &directory);
        if watch_ids.is_empty() {
            warn!("Watch-list resolved to no sticker ids, nothing will ever match");
        } else {
            info!(watched = watch_ids.len(), "Watch-list resolved");
        }

        let mut watcher = Watcher::new(
            client,
            directory,
            watch_ids,
            FoundStore::new(&paths.found_file()),
            SnapshotCache::new(&paths.snapshot_file()),
            base_url,
            interval,
        );

        if self.once {
            let report = watcher.cycle().await?;
            info!(
                snapshot = %report.snapshot_name,
                items = report.catalog_len,
                new = report.newly_matched,
                tracked = report.found_len,
                "Cycle complete"
            );
            return Ok(());
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(true);
            }
        });

        watcher.run(shutdown_rx).await
    }

    fn name(&self) -> &'static str {
        "watch"
    }
}

impl WatchCommand {
    pub fn new(
        config: String,
        data_dir: Option<String>,
        watchlist: Option<String>,
        interval: Option<u64>,
        once: bool,
    ) -> Self {
        Self {
            config,
            data_dir,
            watchlist,
            interval,
            once,
        }
    }
}

/// Fetch the sticker directory and refresh the cache; fall back to the
/// cached copy when the fetch fails for a non-fatal reason.
async fn load_directory<S: StickerSource>(
    source: &S,
    cache: &StickerCache,
) -> Result<StickerDirectory> {
    match source.sticker_document().await {
        Ok(document) => {
            let directory = StickerDirectory::from_value(document.clone())?;
            if let Err(e) = cache.write(&document) {
                warn!(error = %e, "Failed to cache sticker directory");
            }
            Ok(directory)
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) if cache.exists() => {
            warn!(error = %e, "Sticker directory fetch failed, using cached copy");
            StickerDirectory::load_from_file(cache.path())
        }
        Err(e) => Err(e),
    }
}
