use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database Pool Error: {0}")]
    DbPool(#[from] r2d2::Error),

    #[error("Database Error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Remote Store Error: {0}")]
    Remote(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Initialization Failed: {0}")]
    Init(String),
}

impl Error {
    /// True for the share-code miss case, which callers treat as a
    /// recoverable condition rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
