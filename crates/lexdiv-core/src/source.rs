//! Where the raw text comes from.
//!
//! Scoring never touches the outside world. A host hands the core a
//! [`TextSource`] (a file, stdin, a clipboard, a string) and gets text back or
//! a [`SourceError`] it can show to the user.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{SourceError, SourceResult};
use crate::sanitize;

/// A collaborator that supplies the text to score.
pub trait TextSource {
    /// Human-readable name used in errors and logs.
    fn label(&self) -> String;

    /// Read the full text.
    fn read_text(&mut self) -> SourceResult<String>;
}

/// Text read from a file, with an optional size limit.
///
/// Files are read as UTF-8 unless they start with a UTF-16 byte-order mark.
/// Undecodable sequences are dropped rather than rejected.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Utf8PathBuf,
    max_bytes: Option<usize>,
}

impl FileSource {
    /// Read `path` with no size limit.
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_bytes: None,
        }
    }

    /// Refuse files larger than `max_bytes`. `None` removes the limit.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: Option<usize>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// The file being read.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn label(&self) -> String {
        self.path.to_string()
    }

    #[tracing::instrument(skip(self), fields(path = %self.path))]
    fn read_text(&mut self) -> SourceResult<String> {
        let io_err = |source| SourceError::File {
            path: self.path.clone(),
            source,
        };

        // Preflight: check the size before reading into memory.
        let metadata = std::fs::metadata(self.path.as_std_path()).map_err(io_err)?;
        if let Some(limit) = self.max_bytes
            && metadata.len() > limit as u64
        {
            return Err(SourceError::TooLarge {
                label: self.label(),
                size: metadata.len(),
                limit,
            });
        }

        let bytes = std::fs::read(self.path.as_std_path()).map_err(io_err)?;
        tracing::debug!(bytes = bytes.len(), "read file");
        Ok(sanitize::decode_text(&bytes))
    }
}

/// Text read to the end of any reader (typically stdin).
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    label: String,
    max_bytes: Option<usize>,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap `reader`, naming it `label` in errors.
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            label: label.into(),
            max_bytes: None,
        }
    }

    /// Refuse input larger than `max_bytes`. `None` removes the limit.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: Option<usize>) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl ReaderSource<std::io::Stdin> {
    /// Read from standard input.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin(), "stdin")
    }
}

impl<R: Read> TextSource for ReaderSource<R> {
    fn label(&self) -> String {
        self.label.clone()
    }

    #[tracing::instrument(skip(self), fields(label = %self.label))]
    fn read_text(&mut self) -> SourceResult<String> {
        let mut bytes = Vec::new();
        let result = match self.max_bytes {
            // One byte past the limit is enough to know it was exceeded.
            Some(limit) => (&mut self.reader)
                .take(limit as u64 + 1)
                .read_to_end(&mut bytes),
            None => self.reader.read_to_end(&mut bytes),
        };
        result.map_err(|source| SourceError::Stream {
            label: self.label.clone(),
            source,
        })?;

        if let Some(limit) = self.max_bytes
            && bytes.len() > limit
        {
            return Err(SourceError::TooLarge {
                label: self.label.clone(),
                size: bytes.len() as u64,
                limit,
            });
        }

        tracing::debug!(bytes = bytes.len(), "read stream");
        Ok(sanitize::decode_text(&bytes))
    }
}

/// Text already in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineSource(pub String);

impl TextSource for InlineSource {
    fn label(&self) -> String {
        "inline text".to_string()
    }

    fn read_text(&mut self) -> SourceResult<String> {
        Ok(self.0.clone())
    }
}
