//! Reading resolution contexts from files, streams, and directory trees.

mod context_reader;
mod error;

pub use context_reader::{ContextReader, DEFAULT_EXTENSIONS};
pub use error::ReaderError;
