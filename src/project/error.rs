//! Error types for reading resolution contexts from files and streams.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by [`ContextReader`](super::ContextReader).
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The file or stream could not be read.
    #[error("Unable to read {}: {source}", describe(.path.as_deref()))]
    Read {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// The source holds fewer resolution contexts than requested.
    #[error("No resolution context at index {index} in {}", describe(.path.as_deref()))]
    UndefinedResolutionContext { index: usize, path: Option<PathBuf> },

    /// No resolution context declares the requested symbol.
    #[error("Symbol {symbol} is not declared in {}", describe(.path.as_deref()))]
    UndefinedSymbol { symbol: String, path: Option<PathBuf> },
}

impl ReaderError {
    pub(crate) fn read(path: Option<&Path>, source: io::Error) -> Self {
        Self::Read {
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// The path the error refers to, if the source was a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. }
            | Self::UndefinedResolutionContext { path, .. }
            | Self::UndefinedSymbol { path, .. } => path.as_deref(),
        }
    }
}

fn describe(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("'{}'", path.display()),
        None => "stream".to_string(),
    }
}
