use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The user-agent string the marketplace expects on every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36 OPR/83.0.4254.66";

/// Upstream refreshes the snapshot once a minute; polling faster burns
/// request budget without producing new data.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Watcher configuration.
///
/// Every field has a default, so a config file is optional and may set any
/// subset. CLI flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Marketplace base URL
    pub base_url: String,

    /// Name of the snapshot pointer document under /itemdb/
    pub snapshot_pointer: String,

    /// Language for sticker directory names
    pub sticker_lang: String,

    /// User-agent sent with every request
    pub user_agent: String,

    /// Seconds between polling cycles
    pub poll_interval_secs: u64,

    /// Data directory; platform default when unset
    pub data_dir: Option<PathBuf>,

    /// Watch-list file (newline-delimited sticker names)
    pub watchlist: PathBuf,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://market.csgo.com".to_string(),
            snapshot_pointer: "current_730.json".to_string(),
            sticker_lang: "en".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            data_dir: None,
            watchlist: PathBuf::from("watchlist.txt"),
        }
    }
}

impl WatchConfig {
    /// URL of the pointer document naming the current snapshot.
    pub fn pointer_url(&self) -> String {
        format!("{}/itemdb/{}", self.base_url, self.snapshot_pointer)
    }

    /// URL of a snapshot body by name.
    pub fn snapshot_url(&self, name: &str) -> String {
        format!("{}/itemdb/{}", self.base_url, name)
    }

    /// URL of the sticker directory endpoint.
    pub fn stickers_url(&self, api_key: &str) -> String {
        format!(
            "{}/api/GetStickers/?key={}&lang={}",
            self.base_url, api_key, self.sticker_lang
        )
    }
}
