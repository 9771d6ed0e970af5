//! Component resolution and script materialization for mngproj
//!
//! This crate turns a loaded manifest into runnable commands:
//!
//! - **Resolution**: layer each component's type presets by role priority,
//!   then apply inline overrides ([`Project::resolve`])
//! - **Materialization**: build the script environment, load `file:` bodies,
//!   render templates and append arguments ([`Project::materialize`])
//! - **Dependencies**: maintain dependency lists and write the per-component
//!   dependency manifest ([`Project::add_dependency`])
//! - **Tool checks**: verify tools required by presets are on `PATH`
//!
//! # Architecture
//!
//! ```text
//!                mngproj-cli
//!                     |
//!               mngproj-exec
//!                     |
//!               mngproj-core
//!                /         \
//!        mngproj-meta   mngproj-fs
//! ```

pub mod deps;
pub mod env;
pub mod error;
pub mod project;
pub mod resolve;
pub mod script;
pub mod template;
pub mod tools;

pub use env::{COMPONENT_ROOT_VAR, PROJECT_ROOT_VAR};
pub use error::{Error, Result};
pub use project::Project;
pub use resolve::{ResolvedComponent, resolve_component};
pub use script::MaterializedScript;
