use clap::{Parser, Subcommand};

/// Stickerwatch: sticker watch-list alerts for marketplace listings
#[derive(Parser)]
#[command(name = "stickerwatch")]
#[command(version)]
#[command(about = "Polls the marketplace item database and alerts on listings carrying watched stickers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the marketplace and alert on watched stickers
    Watch {
        /// Configuration file path (stickerwatch.yaml is discovered when empty)
        #[arg(long, default_value = "")]
        config: String,

        /// Data directory for caches and results
        #[arg(long)]
        data_dir: Option<String>,

        /// Watch-list file, one sticker name per line
        #[arg(short, long)]
        watchlist: Option<String>,

        /// Seconds between polling cycles
        #[arg(long)]
        interval: Option<u64>,

        /// Run a single cycle and exit
        #[arg(long)]
        once: bool,
    },

    /// Resolve a watch-list against the cached sticker directory
    Resolve {
        /// Configuration file path (stickerwatch.yaml is discovered when empty)
        #[arg(long, default_value = "")]
        config: String,

        /// Data directory for caches and results
        #[arg(long)]
        data_dir: Option<String>,

        /// Watch-list file, one sticker name per line
        #[arg(short, long)]
        watchlist: Option<String>,
    },

    /// Re-fetch the sticker directory and overwrite the cache
    RefreshStickers {
        /// Configuration file path (stickerwatch.yaml is discovered when empty)
        #[arg(long, default_value = "")]
        config: String,

        /// Data directory for caches and results
        #[arg(long)]
        data_dir: Option<String>,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Watch { .. } => "watch",
            Commands::Resolve { .. } => "resolve",
            Commands::RefreshStickers { .. } => "refresh-stickers",
        }
    }

    /// Whether this command talks to the marketplace
    pub fn uses_network(&self) -> bool {
        matches!(
            self,
            Commands::Watch { .. } | Commands::RefreshStickers { .. }
        )
    }
}
