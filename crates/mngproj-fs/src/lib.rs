//! Filesystem primitives for mngproj
//!
//! Provides locked atomic writes, TOML/JSON config loading, manifest discovery
//! and directory-tree scanning with the ignore rules shared by the watcher and
//! project discovery.

pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod io;
pub mod scan;

pub use config::ConfigStore;
pub use constants::{GENERATED_DIRS, ProjectPath};
pub use discovery::{find_manifest, find_projects};
pub use error::{Error, Result};
pub use io::{read_text, write_atomic, write_text};
pub use scan::{TreeFilter, latest_modification};
