//! Command implementations for the Askbot installer
//!
//! This crate contains the `askbot-setup` flow: option handling, interactive
//! completion of the deployment context, the Django compatibility table and
//! the template deployment itself.

/// Command implementations module
pub mod commands;

/// Building blocks of a deployment
pub mod deployment;

/// Error types
pub mod error;

#[cfg(test)]
pub mod test_helpers;

pub use commands::setup;
pub use deployment::context::{ContextKey, DatabaseEngine, DeployContext};
pub use error::SetupError;
