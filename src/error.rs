use thiserror::Error;

/// Application-wide result type
pub type Result<T> = anyhow::Result<T>;

/// Broad classification of a failed fetch, used by views to degrade a
/// single section instead of failing the whole screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a usable HTTP response
    Transport,
    /// A response arrived but could not be understood
    Malformed,
}

/// API-specific errors with typed variants for matching
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("TMDB API key is not configured. Run 'moviescope init' to set up.")]
    NotConfigured,

    #[error("TMDB API error: {0}")]
    Tmdb(String),

    #[error("TMDB returned HTTP {0}")]
    Status(u16),

    #[error("Malformed TMDB response: {0}")]
    Malformed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Classify the error for section-level degradation
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ApiError::Malformed(_) => FailureKind::Malformed,
            ApiError::NotConfigured
            | ApiError::Tmdb(_)
            | ApiError::Status(_)
            | ApiError::Network(_) => FailureKind::Transport,
        }
    }
}

/// Errors raised by a watchlist storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage task failed: {0}")]
    Task(String),

    #[error("Failed to encode watchlist: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A watchlist key string that is not `<kind>:<id>`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("missing ':' separator in '{0}'")]
    MissingSeparator(String),

    #[error("unknown media kind '{0}' (expected 'movie' or 'tv')")]
    UnknownKind(String),

    #[error("invalid id '{0}' (expected a decimal number)")]
    InvalidId(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found. Run 'moviescope init' to set up.")]
    NotFound,

    #[error("Invalid config file: {0}")]
    Invalid(String),

    #[error("TMDB API key is required. Run 'moviescope init' to set up.")]
    MissingApiKey,

    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Player errors
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Please install it or configure a different player.")]
    NotFound(String),

    #[error("Player exited with error: {0}")]
    ExitError(String),

    #[error("Failed to launch player: {0}")]
    LaunchFailed(String),
}
