//! Error taxonomy for cell lookup, parsing and placement.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while converting text into a placement script.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable configuration. Raised before any output exists.
    #[error("configuration error: {0}")]
    Config(String),

    /// No cell document for this character. The engine recovers from this
    /// by resolving the fallback glyph instead.
    #[error("no cell document for {character:?} at {}", path.display())]
    DocumentNotFound { character: char, path: PathBuf },

    /// Neither the character nor the fallback glyph has a document.
    #[error("no cell document for {character:?} and fallback {fallback:?} is missing too ({})", path.display())]
    FallbackMissing {
        character: char,
        fallback: char,
        path: PathBuf,
    },

    /// A token that must be numeric (or present) was not.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
