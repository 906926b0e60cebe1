//! Core library for lexdiv.
//!
//! This crate scores the lexical diversity of prose using the Moving-Average
//! Type-Token Ratio (MATTR). It is used by the `lexdiv` CLI and MCP server and
//! by any downstream consumer that wants the numbers without the host glue.
//!
//! # Modules
//!
//! - [`sanitize`] - Control-character and surrogate cleanup
//! - [`tokenize`] - Lowercased word tokens
//! - [`mattr`] - Sliding-window type-token ratios
//! - [`report`] - Description rendering and structured reports
//! - [`source`] - Collaborators that supply the raw text
//! - [`markdown`] - Prose extraction for Markdown input
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lexdiv_core::{ReportConfig, compute_report};
//!
//! let report = compute_report("The cat sat on the mat.", &ReportConfig::default());
//! assert!(report.starts_with("0.833 MATTR-100 score"));
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod markdown;
pub mod mattr;
pub mod report;
pub mod sanitize;
pub mod source;
pub mod tokenize;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, SourceError, SourceResult};
pub use mattr::{MattrResult, WindowCounts, mattr};
pub use report::{
    DisplayReport, DiversityReport, Preset, ReportConfig, WindowDisplay, analyze, compute_report,
};
pub use sanitize::{SurrogatePolicy, sanitize};
pub use source::{FileSource, InlineSource, ReaderSource, TextSource};
pub use tokenize::{WordClass, tokenize};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
