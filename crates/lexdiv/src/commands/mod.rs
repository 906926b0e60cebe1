//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use lexdiv_core::{FileSource, ReaderSource, TextSource, markdown};

pub mod info;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod tokens;

/// Where the text comes from and how it is prepared.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// File to read (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,

    /// Read the text from the system clipboard.
    #[cfg(feature = "clipboard")]
    #[arg(long, conflicts_with = "file")]
    pub clipboard: bool,

    /// Strip Markdown to prose first (default for .md files).
    #[arg(long, overrides_with = "no_markdown")]
    pub markdown: bool,

    /// Treat the input as plain text even if it is Markdown.
    #[arg(long, overrides_with = "markdown")]
    pub no_markdown: bool,
}

impl InputArgs {
    /// The file argument, unless it names stdin.
    pub fn file_path(&self) -> Option<&Utf8Path> {
        self.file
            .as_deref()
            .filter(|path| path.as_str() != "-")
    }

    /// Human-readable input name for logs.
    pub fn label(&self) -> String {
        #[cfg(feature = "clipboard")]
        if self.clipboard {
            return "clipboard".to_string();
        }
        self.file_path()
            .map_or_else(|| "stdin".to_string(), |path| path.to_string())
    }

    /// Whether to reduce the input to prose before scoring.
    ///
    /// Flags win, then the configured default, then the file extension.
    pub fn strip_markdown(&self, configured: Option<bool>) -> bool {
        if self.markdown {
            return true;
        }
        if self.no_markdown {
            return false;
        }
        configured.unwrap_or_else(|| self.file_path().is_some_and(is_markdown_path))
    }

    fn source(&self, max_bytes: Option<usize>) -> Box<dyn TextSource> {
        #[cfg(feature = "clipboard")]
        if self.clipboard {
            return Box::new(crate::clipboard::ClipboardSource::new().with_max_bytes(max_bytes));
        }
        match self.file_path() {
            Some(path) => Box::new(FileSource::new(path).with_max_bytes(max_bytes)),
            None => Box::new(ReaderSource::stdin().with_max_bytes(max_bytes)),
        }
    }
}

/// Read the input text, enforcing the size limit and stripping Markdown
/// when requested.
pub fn read_input(
    input: &InputArgs,
    max_bytes: Option<usize>,
    configured_markdown: Option<bool>,
) -> anyhow::Result<String> {
    let mut source = input.source(max_bytes);
    let text = source
        .read_text()
        .with_context(|| format!("failed to read input from {}", source.label()))?;

    if input.strip_markdown(configured_markdown) {
        tracing::debug!(input = %source.label(), "stripping markdown");
        Ok(markdown::strip_to_prose(&text))
    } else {
        Ok(text)
    }
}

fn is_markdown_path(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(file: Option<&str>) -> InputArgs {
        InputArgs {
            file: file.map(Utf8PathBuf::from),
            ..InputArgs::default()
        }
    }

    #[test]
    fn dash_means_stdin() {
        assert!(input(Some("-")).file_path().is_none());
        assert_eq!(input(Some("-")).label(), "stdin");
        assert_eq!(input(None).label(), "stdin");
        assert_eq!(input(Some("notes.txt")).label(), "notes.txt");
    }

    #[test]
    fn markdown_detected_by_extension() {
        assert!(input(Some("README.md")).strip_markdown(None));
        assert!(input(Some("post.Markdown")).strip_markdown(None));
        assert!(!input(Some("notes.txt")).strip_markdown(None));
        assert!(!input(None).strip_markdown(None));
    }

    #[test]
    fn configured_default_beats_extension() {
        assert!(!input(Some("README.md")).strip_markdown(Some(false)));
        assert!(input(Some("notes.txt")).strip_markdown(Some(true)));
    }

    #[test]
    fn flags_beat_configuration() {
        let mut args = input(Some("notes.txt"));
        args.markdown = true;
        assert!(args.strip_markdown(Some(false)));

        let mut args = input(Some("README.md"));
        args.no_markdown = true;
        assert!(!args.strip_markdown(Some(true)));
    }

    #[test]
    fn read_input_strips_markdown_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("post.md");
        std::fs::write(&path, "# Title\n\n```\ncode here\n```\n\nBody.").unwrap();

        let args = input(Some(path.to_str().unwrap()));
        let text = read_input(&args, None, None).unwrap();
        assert!(text.contains("Title"));
        assert!(!text.contains("code here"));
    }

    #[test]
    fn read_input_reports_missing_file() {
        let args = input(Some("/nonexistent/lexdiv/missing.txt"));
        let err = read_input(&args, None, None).unwrap_err();
        assert!(format!("{err:#}").contains("missing.txt"));
    }
}
