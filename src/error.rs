use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the table and by the benchmark's loader and renderers.
#[derive(Error, Debug)]
pub enum HashBenchError {
    /// A required argument was absent, e.g. a `None` key.
    #[error("invalid argument: {what}")]
    InvalidArgument { what: &'static str },

    /// The keys file could not be opened, mapped or read.
    #[error("failed to load keys from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The keys file held no non-blank line.
    #[error("no keys found in {}", path.display())]
    EmptyInput { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HashBenchError>;
