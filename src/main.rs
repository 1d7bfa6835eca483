use clap::Parser;
use stickerwatch::cli::commands::{
    refresh_stickers::RefreshStickersCommand, resolve::ResolveCommand, watch::WatchCommand,
    CommandHandler,
};
use stickerwatch::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stickerwatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            config,
            data_dir,
            watchlist,
            interval,
            once,
        } => {
            WatchCommand::new(config, data_dir, watchlist, interval, once)
                .execute()
                .await?;
        }
        Commands::Resolve {
            config,
            data_dir,
            watchlist,
        } => {
            ResolveCommand::new(config, data_dir, watchlist)
                .execute()
                .await?;
        }
        Commands::RefreshStickers { config, data_dir } => {
            RefreshStickersCommand::new(config, data_dir)
                .execute()
                .await?;
        }
    }

    Ok(())
}
