use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by manuscript operations.
///
/// Malformed markup is never an error; see [`crate::lexer`] for how it is
/// tolerated.
#[derive(Debug, Error)]
pub enum Error {
    /// The manuscript file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing serialized or rendered output failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A chapter selector matched neither an ordinal nor a title.
    #[error("no such chapter: {0}")]
    NoSuchChapter(String),

    /// A per-chapter statistic was requested on a manuscript with no chapters.
    #[error("manuscript has no chapters")]
    NoChapters,
}

/// Convenience alias for results of manuscript operations.
pub type Result<T> = std::result::Result<T, Error>;
