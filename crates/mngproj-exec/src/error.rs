//! Error types for process execution

use std::fmt;

/// Result type alias for execution operations
pub type Result<T> = std::result::Result<T, Error>;

/// How a failed script ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Code(i32),
    /// Terminated by a signal, no exit code
    Signal,
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Code(code) => write!(f, "exit status {code}"),
            ExitCode::Signal => f.write_str("terminated by signal"),
        }
    }
}

/// Errors that can occur while launching or supervising scripts
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The shell process could not be started
    #[error("failed to start {component:?}: {source}")]
    LaunchFailure {
        component: String,
        #[source]
        source: std::io::Error,
    },

    /// Script ran and exited unsuccessfully
    #[error("script {script:?} of {component:?} failed: {code}")]
    ScriptFailed {
        component: String,
        script: String,
        code: ExitCode,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] mngproj_core::Error),
}
