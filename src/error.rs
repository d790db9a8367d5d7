//! Error types for record stream decoding
//!
//! Only stream-level failures surface here. Malformed record content is never
//! an error; see [`crate::decoder::SkipReason`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, decoding or writing test data files
#[derive(Error, Debug)]
pub enum StdfError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read record stream: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Record payload too large: {len} bytes (max {})", u16::MAX)]
    PayloadTooLarge { len: usize },
}

/// Result type for record stream operations
pub type Result<T> = std::result::Result<T, StdfError>;
