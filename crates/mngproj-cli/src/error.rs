//! Error types for mngproj-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mngproj-core
    #[error(transparent)]
    Core(#[from] mngproj_core::Error),

    /// Error from mngproj-exec
    #[error(transparent)]
    Exec(#[from] mngproj_exec::Error),

    /// Error from mngproj-meta
    #[error(transparent)]
    Meta(#[from] mngproj_meta::Error),

    /// Error from mngproj-fs
    #[error(transparent)]
    Fs(#[from] mngproj_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
