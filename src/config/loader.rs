use super::types::WatchConfig;
use crate::{Result, WatchError};
use std::path::Path;
use tracing::debug;

/// Default config file name, discovered in the working directory.
pub const CONFIG_FILE: &str = "stickerwatch.yaml";

/// Load configuration from an explicit file, or fall back to discovery.
///
/// An explicit path that does not exist is an error; a missing discovered
/// file just yields the defaults.
pub fn load_config(path: &str) -> Result<WatchConfig> {
    if !path.is_empty() {
        return load_config_file(Path::new(path));
    }

    let discovered = Path::new(CONFIG_FILE);
    if discovered.exists() {
        load_config_file(discovered)
    } else {
        debug!("No {} found, using defaults", CONFIG_FILE);
        Ok(WatchConfig::default())
    }
}

fn load_config_file(path: &Path) -> Result<WatchConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        WatchError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let config: WatchConfig = serde_yaml_ng::from_str(&contents).map_err(|e| {
        WatchError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}
