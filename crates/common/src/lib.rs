//! Shared utilities for the Askbot installer
//!
//! Holds the terminal-backed [`UserInterface`](askbot_runtime::UserInterface)
//! used in production and the scripted one used by tests.

/// User interface implementations
pub mod ui;

pub use ui::{RealUserInterface, ScriptedAnswer, TestUserInterface};
