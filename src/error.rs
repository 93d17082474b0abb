/// Error types for the browser and network seams

/// Failure of the extension's key-value storage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("malformed storage record: {0}")]
    Malformed(String),
}

/// Failure of a tabs/windows call into the browser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("tab {0} not found")]
    TabNotFound(i32),
    #[error("{0}")]
    Call(String),
}

/// Transport-level failure talking to the CuraQ API.
/// HTTP error statuses are not errors at this level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
}
