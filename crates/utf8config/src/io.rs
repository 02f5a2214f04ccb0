//! File I/O wrappers. The rest of the crate is text in, text out; this is
//! the only place that touches the filesystem.

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, Utf8ConfigError};

/// Read a UTF-8 text file.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| Utf8ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `text` to `path` as UTF-8, replacing any existing file.
pub fn write_text(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, text.as_bytes()).map_err(|source| Utf8ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load a document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Config::load(&read_text(path)?)
    }

    /// Dump the document into a file.
    pub fn write_to_path(&self, path: impl AsRef<Path>, ignore_comment: bool) -> Result<()> {
        write_text(&self.dump(ignore_comment)?, path)
    }
}
