// src/error.rs

use std::process::ExitStatus;
use thiserror::Error;

/// Core error types for dnfwrap
#[derive(Error, Debug)]
pub enum Error {
    /// A required package name was empty or whitespace-only
    #[error("{operation}: package name was not specified")]
    PackageNameNotSpecified { operation: &'static str },

    /// The package-manager binary could not be launched
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The package-manager exited unsuccessfully
    #[error("`{command}` failed with {status}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure of a client operation, with the operation that ran it
    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The innermost error, skipping any `Operation` context
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias using dnfwrap's Error type
pub type Result<T> = std::result::Result<T, Error>;
