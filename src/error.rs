use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database request failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("invalid route '{0}'")]
    InvalidRoute(String),

    #[error("error reading file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("background request ended without a result")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, AppError>;
