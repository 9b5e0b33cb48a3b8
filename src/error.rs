use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Menu has no items")]
    EmptyMenu,

    #[error("Invalid visible capacity: {0}")]
    InvalidCapacity(usize),

    #[error("Unknown device profile: {0}")]
    UnknownDevice(String),

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Could not find home directory")]
    NoHomeDirectory,

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;
