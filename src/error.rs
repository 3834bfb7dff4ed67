use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a knowledge base.
///
/// Answering a query never fails; only the startup path that reads a
/// knowledge base from disk can produce one of these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read knowledge base {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid knowledge base JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("knowledge base entry at index {index} has an empty {field}")]
    InvalidEntry { index: usize, field: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
