pub mod refresh_stickers;
pub mod resolve;
pub mod watch;

use crate::config::WatchConfig;
use crate::io::paths::DataPaths;
use crate::Result;

/// Common trait for all command handlers
#[allow(async_fn_in_trait)]
pub trait CommandHandler {
    /// Execute the command
    async fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Resolve the data directory from config, falling back to the platform
/// default, and make sure it exists.
pub(crate) fn data_paths(config: &WatchConfig) -> Result<DataPaths> {
    let paths = match &config.data_dir {
        Some(root) => DataPaths::for_root(root),
        None => DataPaths::new()?,
    };
    paths.ensure_root()?;
    Ok(paths)
}
