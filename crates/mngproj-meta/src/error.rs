//! Error types for mngproj-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] mngproj_fs::Error),

    #[error("Duplicate component name found: {name:?}")]
    DuplicateComponentName { name: String },

    #[error("Preset file for type {type_name:?} not found in {dir}")]
    PresetNotFound { type_name: String, dir: PathBuf },

    #[error("Invalid preset at {path}: {message}")]
    InvalidPreset { path: PathBuf, message: String },
}
