use thiserror::Error;

/// Unified error type for openapi-info-sync operations
#[derive(Error, Debug)]
pub enum InfoSyncError {
    #[error("License data fetch failed: {0}")]
    Fetch(String),

    #[error("Malformed license data: {0}")]
    LicenseData(String),

    #[error("Unreadable OpenAPI document: {0}")]
    Document(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in openapi-info-sync
pub type Result<T> = std::result::Result<T, InfoSyncError>;

impl InfoSyncError {
    /// Create a fetch error with context
    pub fn fetch(msg: impl Into<String>) -> Self {
        InfoSyncError::Fetch(msg.into())
    }

    /// Create a license data error with context
    pub fn license_data(msg: impl Into<String>) -> Self {
        InfoSyncError::LicenseData(msg.into())
    }

    /// Create a document error with context
    pub fn document(msg: impl Into<String>) -> Self {
        InfoSyncError::Document(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        InfoSyncError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        InfoSyncError::Config(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        InfoSyncError::Prompt(msg.into())
    }
}
