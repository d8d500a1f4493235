//! File, stream, and directory front end for the context parser.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::ReaderError;
use crate::context::{ParsedResolutionContext, SymbolKind};
use crate::parser::parse_source;
use crate::symbol::Symbol;

/// File extensions [`ContextReader::read_dir`] picks up by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["php"];

/// Parses resolution contexts out of PHP sources wherever they live.
#[derive(Debug, Clone)]
pub struct ContextReader {
    extensions: Vec<String>,
}

impl Default for ContextReader {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl ContextReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extensions `read_dir` matches (compared case-insensitively,
    /// without the leading dot).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn read_source(&self, source: &str) -> Vec<ParsedResolutionContext> {
        parse_source(source)
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<ParsedResolutionContext>, ReaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReaderError::read(Some(path), e))?;
        self.read_stream(BufReader::new(file), Some(path))
    }

    /// Read `reader` to the end and parse it. `path` only labels errors.
    pub fn read_stream<R: Read>(
        &self,
        mut reader: R,
        path: Option<&Path>,
    ) -> Result<Vec<ParsedResolutionContext>, ReaderError> {
        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|e| ReaderError::read(path, e))?;

        let contexts = parse_source(&source);
        debug!(
            path = ?path,
            bytes = source.len(),
            contexts = contexts.len(),
            "read resolution contexts"
        );
        Ok(contexts)
    }

    /// Read many files in parallel. Results keep the input order.
    pub fn read_files<P>(&self, paths: &[P]) -> Vec<(PathBuf, Result<Vec<ParsedResolutionContext>, ReaderError>)>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                (path.to_path_buf(), self.read_file(path))
            })
            .collect()
    }

    /// Read every matching file below `dir`, sorted by path.
    ///
    /// Files that cannot be read are logged and skipped; only a missing or
    /// unreadable `dir` is an error.
    pub fn read_dir(
        &self,
        dir: impl AsRef<Path>,
    ) -> Result<Vec<(PathBuf, Vec<ParsedResolutionContext>)>, ReaderError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => {
                    return Err(ReaderError::read(Some(dir), error.into()));
                }
                Err(error) => {
                    warn!(%error, "skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        debug!(dir = %dir.display(), files = paths.len(), "reading directory");
        Ok(self
            .read_files(&paths)
            .into_iter()
            .filter_map(|(path, result)| match result {
                Ok(contexts) => Some((path, contexts)),
                Err(error) => {
                    warn!(%error, "skipping unreadable file");
                    None
                }
            })
            .collect())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }

    /// The `index`-th resolution context of the file at `path`.
    pub fn context_at(
        &self,
        path: impl AsRef<Path>,
        index: usize,
    ) -> Result<ParsedResolutionContext, ReaderError> {
        let path = path.as_ref();
        self.read_file(path)?
            .into_iter()
            .nth(index)
            .ok_or_else(|| ReaderError::UndefinedResolutionContext {
                index,
                path: Some(path.to_path_buf()),
            })
    }

    /// The resolution context declaring the class, interface, or trait `symbol`.
    pub fn context_for_symbol(
        &self,
        path: impl AsRef<Path>,
        symbol: &Symbol,
    ) -> Result<ParsedResolutionContext, ReaderError> {
        self.context_declaring(
            path.as_ref(),
            symbol,
            &[SymbolKind::Class, SymbolKind::Interface, SymbolKind::Trait],
        )
    }

    /// The resolution context declaring the function `symbol`.
    pub fn context_for_function(
        &self,
        path: impl AsRef<Path>,
        symbol: &Symbol,
    ) -> Result<ParsedResolutionContext, ReaderError> {
        self.context_declaring(path.as_ref(), symbol, &[SymbolKind::Function])
    }

    fn context_declaring(
        &self,
        path: &Path,
        symbol: &Symbol,
        kinds: &[SymbolKind],
    ) -> Result<ParsedResolutionContext, ReaderError> {
        self.read_file(path)?
            .into_iter()
            .find(|context| context.find_symbol(symbol, kinds).is_some())
            .ok_or_else(|| ReaderError::UndefinedSymbol {
                symbol: symbol.to_qualified().normalize().to_string(),
                path: Some(path.to_path_buf()),
            })
    }
}

#[cfg(test)]
#[path = "context_reader/tests/tests_context_reader.rs"]
mod tests;
