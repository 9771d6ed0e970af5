//! Shared test utilities for the mngproj workspace.
//!
//! This crate provides standardised project fixtures so crate test suites do
//! not each hand-roll temp directories. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`project`] - [`TestProject`] builder: manifest, presets and source files

pub mod project;

pub use project::TestProject;
