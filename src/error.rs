use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Sticker directory error: {0}")]
    Directory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;

impl WatchError {
    /// Whether this error should end the process rather than be retried on
    /// the next polling cycle. Session and configuration problems cannot be
    /// recovered from inside the loop; everything else is cycle-local.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WatchError::Auth(_) | WatchError::Config(_))
    }
}
