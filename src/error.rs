//! Error types.  The simulation itself is infallible; only configuration
//! loading and terminal I/O can fail.

#[derive(thiserror::Error, Debug)]
pub enum InvadersError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, InvadersError>;
