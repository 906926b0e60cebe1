//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes lexical diversity scoring over MCP on stdio, so editors and
//! assistants can score a draft without shelling out to the CLI.
//!
//! Each `#[tool]` method delegates to `lexdiv-core`; the server only parses
//! parameters, enforces the input limit and serializes results.

use std::num::NonZeroUsize;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use lexdiv_core::config::Config;
use lexdiv_core::{Preset, SourceError, WordClass, markdown, mattr, sanitize, tokenize};

use crate::commands::score::ReportOverrides;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `measure_diversity` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct MeasureDiversityParams {
    /// The text to score.
    pub text: String,
    /// Report layout: "dual" or "single". Defaults to the server configuration.
    pub preset: Option<Preset>,
    /// MATTR window sizes, replacing the preset's windows.
    pub windows: Option<Vec<usize>>,
    /// Word count below which the report carries a small-sample caveat.
    pub threshold: Option<usize>,
    /// Whether to strip markdown formatting before scoring.
    pub strip_markdown: Option<bool>,
}

/// Parameters for the `tokenize_text` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct TokenizeTextParams {
    /// The text to tokenize.
    pub text: String,
    /// Treat any Unicode letter or digit as a word character.
    #[serde(default)]
    pub unicode_words: bool,
}

/// MCP server exposing lexical diversity scoring.
#[derive(Clone)]
pub struct LexdivServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    config: Config,
    max_input: Option<usize>,
}

impl Default for LexdivServer {
    fn default() -> Self {
        let config = Config::default();
        let max_input = config.input_limit();
        Self::new(config, max_input)
    }
}

#[tool_router]
impl LexdivServer {
    /// Create a server that scores with `config` and refuses text over
    /// `max_input` bytes.
    pub fn new(config: Config, max_input: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
            max_input,
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input {
            Some(limit) if text.len() > limit => {
                let err = SourceError::TooLarge {
                    label: "text".to_string(),
                    size: text.len() as u64,
                    limit,
                };
                Err(McpError::invalid_params(err.to_string(), None))
            }
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "preset": self.config.preset.as_str(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score lexical diversity (MATTR).
    #[tool(
        description = "Measure lexical diversity of text with the Moving-Average Type-Token Ratio (MATTR). Returns per-window scores, word counts and the rendered description."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn measure_diversity(
        &self,
        Parameters(params): Parameters<MeasureDiversityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "measure_diversity",
            preset = ?params.preset,
            windows = ?params.windows,
            "executing MCP tool"
        );
        self.check_size(&params.text)?;

        let windows = params
            .windows
            .unwrap_or_default()
            .into_iter()
            .map(|size| {
                NonZeroUsize::new(size)
                    .ok_or_else(|| McpError::invalid_params("window sizes must be positive", None))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let overrides = ReportOverrides {
            preset: params.preset,
            windows,
            threshold: params.threshold,
            ..ReportOverrides::default()
        };
        let report_config = overrides
            .resolve(&self.config)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let strip = params
            .strip_markdown
            .or(self.config.strip_markdown)
            .unwrap_or(false);
        let report = if strip {
            lexdiv_core::analyze(&markdown::strip_to_prose(&params.text), &report_config)
        } else {
            lexdiv_core::analyze(&params.text, &report_config)
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "measure_diversity",
            words = report.words,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Split text into the word tokens the score is computed from.
    #[tool(description = "Tokenize text into lowercased words. Returns the tokens and counts.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn tokenize_text(
        &self,
        Parameters(params): Parameters<TokenizeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;

        let class = if params.unicode_words {
            WordClass::Unicode
        } else {
            self.config.word_class
        };
        let clean = sanitize::sanitize_with(&params.text, self.config.surrogates);
        let tokens = tokenize::tokenize_with(&clean, class);

        let result = serde_json::json!({
            "words": tokens.len(),
            "distinct_words": mattr::distinct_count(&tokens),
            "tokens": tokens,
        });
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for LexdivServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use measure_diversity to score the lexical diversity of prose.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
