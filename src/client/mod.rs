//! Marketplace HTTP collaborators.
//!
//! The polling core only depends on the [`CatalogSource`] and
//! [`StickerSource`] contracts; [`MarketClient`] is the reqwest-backed
//! implementation against the live service.

pub mod api_key;
pub mod session;

pub use api_key::ApiKeyStore;
pub use session::{FileSession, SessionProvider};

use crate::config::WatchConfig;
use crate::{Result, WatchError};
use reqwest::header;
use reqwest::{Response, StatusCode};
use tracing::debug;

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
     image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Supplies catalog snapshots: the name of the current one, then its body.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn snapshot_name(&self) -> Result<String>;
    async fn snapshot_body(&self, name: &str) -> Result<String>;
}

/// Supplies the sticker directory document.
#[allow(async_fn_in_trait)]
pub trait StickerSource {
    async fn sticker_document(&self) -> Result<serde_json::Value>;
}

/// HTTP client for the marketplace, carrying the fixed user-agent and the
/// session cookie header on every request.
pub struct MarketClient<S: SessionProvider> {
    http: reqwest::Client,
    session: S,
    config: WatchConfig,
    api_key: String,
}

impl<S: SessionProvider> MarketClient<S> {
    pub fn new(config: WatchConfig, session: S, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            session,
            config,
            api_key,
        })
    }

    async fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, ACCEPT)
            .header(header::COOKIE, self.session.cookie_header()?)
            .send()
            .await?;
        check_status(response, url)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        Ok(self.get(url).await?.json().await?)
    }
}

/// Non-2xx statuses are distinguished from transport failure; 401/403 mean
/// the session is no longer valid.
fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(WatchError::Auth(format!(
            "Marketplace rejected the session ({}) at {}",
            status, url
        )));
    }
    if !status.is_success() {
        return Err(WatchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

impl<S: SessionProvider> CatalogSource for MarketClient<S> {
    async fn snapshot_name(&self) -> Result<String> {
        let url = self.config.pointer_url();
        let pointer = self.get_json(&url).await?;
        pointer
            .get("db")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                WatchError::Snapshot(format!("Pointer document at {} has no `db` field", url))
            })
    }

    async fn snapshot_body(&self, name: &str) -> Result<String> {
        self.get_text(&self.config.snapshot_url(name)).await
    }
}

impl<S: SessionProvider> StickerSource for MarketClient<S> {
    async fn sticker_document(&self) -> Result<serde_json::Value> {
        self.get_json(&self.config.stickers_url(&self.api_key)).await
    }
}
