//! Installer commands

pub mod setup;
