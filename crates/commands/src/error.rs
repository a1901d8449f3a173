//! Failure kinds the installer recognizes by name

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the setup flow
#[derive(Debug, Error)]
pub enum SetupError {
    /// The user hit Ctrl-C at a prompt
    #[error("Aborted")]
    Aborted,

    /// The installed Django is newer than anything the templates support
    #[error("Django framework with major version > 1 is not supported (found {major}.{minor})")]
    UnsupportedFramework {
        /// Major version found
        major: u32,
        /// Minor version found
        minor: u32,
    },

    /// The interpreter could not report a Django version
    #[error("Could not detect the Django version using '{interpreter}': {reason}")]
    FrameworkProbe {
        /// Interpreter that was run
        interpreter: String,
        /// What went wrong
        reason: String,
    },

    /// A path that must be a directory names a file
    #[error("{} is a file, cannot install there", .0.display())]
    NotADirectory(PathBuf),
}

impl SetupError {
    /// Returns true when `err` was caused by the user interrupting a prompt
    pub fn is_abort(err: &anyhow::Error) -> bool {
        err.chain().any(|cause| {
            matches!(cause.downcast_ref::<Self>(), Some(Self::Aborted))
                || cause
                    .downcast_ref::<io::Error>()
                    .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
        })
    }
}
