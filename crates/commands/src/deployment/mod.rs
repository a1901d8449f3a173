//! Building blocks of the askbot deployment

pub mod compat;
pub mod context;
pub mod deploy;
pub mod messages;
pub mod paths;
