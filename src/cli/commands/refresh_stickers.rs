use super::{data_paths, CommandHandler};
use crate::client::{ApiKeyStore, FileSession, MarketClient, StickerSource};
use crate::config::loader;
use crate::market::StickerDirectory;
use crate::store::StickerCache;
use crate::Result;
use std::path::PathBuf;
use tracing::info;

/// Handler for the `refresh-stickers` command: re-fetches the sticker
/// directory and overwrites the cache.
pub struct RefreshStickersCommand {
    pub config: String,
    pub data_dir: Option<String>,
}

impl CommandHandler for RefreshStickersCommand {
    async fn execute(&self) -> Result<()> {
        let mut config = loader::load_config(&self.config)?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(PathBuf::from(dir));
        }

        let paths = data_paths(&config)?;
        let session = FileSession::new(&paths.cookies_file());
        let api_key = ApiKeyStore::new(&paths.api_key_file()).load()?;
        let client = MarketClient::new(config, session, api_key)?;

        let document = client.sticker_document().await?;
        let directory = StickerDirectory::from_value(document.clone())?;

        let cache = StickerCache::new(&paths.stickers_file());
        cache.write(&document)?;

        info!(
            stickers = directory.len(),
            cache = %cache.path().display(),
            "Sticker directory refreshed"
        );
        println!("{} stickers cached", directory.len());

        Ok(())
    }

    fn name(&self) -> &'static str {
        "refresh-stickers"
    }
}

impl RefreshStickersCommand {
    pub fn new(config: String, data_dir: Option<String>) -> Self {
        Self { config, data_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_command_creation() {
        let cmd = RefreshStickersCommand::new("".to_string(), Some("/tmp/sw".to_string()));

        assert_eq!(cmd.config, "");
        assert_eq!(cmd.data_dir, Some("/tmp/sw".to_string()));
        assert_eq!(cmd.name(), "refresh-stickers");
    }
}
