//! System clipboard as a text source.

use lexdiv_core::{SourceError, SourceResult, TextSource};

const LABEL: &str = "clipboard";

/// Reads the current text contents of the system clipboard.
#[derive(Debug, Default)]
pub struct ClipboardSource {
    max_bytes: Option<usize>,
}

impl ClipboardSource {
    /// A clipboard source with no size limit.
    pub const fn new() -> Self {
        Self { max_bytes: None }
    }

    /// Refuse clipboard text larger than `max_bytes`.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: Option<usize>) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl TextSource for ClipboardSource {
    fn label(&self) -> String {
        LABEL.to_string()
    }

    #[tracing::instrument(skip(self))]
    fn read_text(&mut self) -> SourceResult<String> {
        let unavailable = |e: arboard::Error| SourceError::Unavailable {
            label: LABEL.to_string(),
            reason: e.to_string(),
        };
        let text = arboard::Clipboard::new()
            .map_err(unavailable)?
            .get_text()
            .map_err(unavailable)?;

        if let Some(limit) = self.max_bytes
            && text.len() > limit
        {
            return Err(SourceError::TooLarge {
                label: LABEL.to_string(),
                size: text.len() as u64,
                limit,
            });
        }

        tracing::debug!(bytes = text.len(), "read clipboard");
        Ok(text)
    }
}
