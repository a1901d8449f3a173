//! Core abstractions for the Askbot installer
//!
//! This crate contains the configuration constants and the dependency
//! injection interfaces shared by the installer crates.

/// Configuration constants and types
pub mod config;
/// Dependency injection traits and implementations
pub mod deps;

// Re-export commonly used types at the crate root
pub use config::{DEFAULT_PYTHON, DJANGO_VERSION_ENV_VAR, PYTHON_ENV_VAR};
pub use deps::{
    CommandExecutor, CommandOutput, FileSystem, MessageStyle, ProgressIndicator,
    RealCommandExecutor, RealFileSystem, UserInterface,
};
