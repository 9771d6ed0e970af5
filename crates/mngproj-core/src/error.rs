//! Error types for mngproj-core

use std::path::PathBuf;

/// Result type for mngproj-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or materializing components
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("component {name:?} not found")]
    ComponentNotFound { name: String },

    #[error("failed to load preset {type_name:?}: {reason}")]
    PresetLoadFailure { type_name: String, reason: String },

    #[error("script {script:?} not defined for component {component:?}")]
    ScriptNotDefined { component: String, script: String },

    #[error("failed to read script file {path}: {source}")]
    ScriptFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Script template failed to parse or execute
    #[error("script template for {component:?}: {reason}")]
    TemplateError { component: String, reason: String },

    #[error("missing required tools: {}", .tools.join(", "))]
    MissingTools { tools: Vec<String> },

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] mngproj_fs::Error),

    #[error(transparent)]
    Meta(#[from] mngproj_meta::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
