use super::{data_paths, CommandHandler};
use crate::config::loader;
use crate::market::{watchlist, StickerDirectory};
use crate::{Result, WatchError};
use std::path::PathBuf;

/// Handler for the `resolve` command: shows what a watch-list resolves to
/// against the cached sticker directory, without touching the network.
pub struct ResolveCommand {
    pub config: String,
    pub data_dir: Option<String>,
    pub watchlist: Option<String>,
}

impl CommandHandler for ResolveCommand {
    async fn execute(&self) -> Result<()> {
        let mut config = loader::load_config(&self.config)?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = &self.watchlist {
            config.watchlist = PathBuf::from(path);
        }

        let paths = data_paths(&config)?;
        let stickers_file = paths.stickers_file();
        if !stickers_file.exists() {
            return Err(WatchError::Directory(format!(
                "No sticker directory cache at {}; run `stickerwatch refresh-stickers` first",
                stickers_file.display()
            )));
        }
        let directory = StickerDirectory::load_from_file(&stickers_file)?;

        let names = watchlist::load_watchlist(&config.watchlist)?;
        if names.is_empty() {
            println!("Watch-list is empty");
            return Ok(());
        }

        let mut resolved = 0usize;
        for name in &names {
            match directory.get_id(name) {
                Some(id) => {
                    resolved += 1;
                    println!("{}\t{}", id, name);
                }
                None => println!("-\t{} (not in directory)", name),
            }
        }
        println!("{}/{} names resolved", resolved, names.len());

        Ok(())
    }

    fn name(&self) -> &'static str {
        "resolve"
    }
}

impl ResolveCommand {
    pub fn new(config: String, data_dir: Option<String>, watchlist: Option<String>) -> Self {
        Self {
            config,
            data_dir,
            watchlist,
        }
    }
}
