use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote error: {status}: {detail}")]
    Remote {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to update table. {0}")]
    UpdateFailed(Box<TableError>),
}

impl TableError {
    pub fn update_failed(cause: TableError) -> Self {
        match cause {
            already @ TableError::UpdateFailed(_) => already,
            other => TableError::UpdateFailed(Box::new(other)),
        }
    }

    /// The innermost error, looking through `UpdateFailed` wrappers.
    pub fn root(&self) -> &TableError {
        match self {
            TableError::UpdateFailed(inner) => inner.root(),
            other => other,
        }
    }
}

pub type TableResult<T> = Result<T, TableError>;
