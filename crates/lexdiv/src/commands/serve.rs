//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use lexdiv_core::config::Config;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::LexdivServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    // Reject a bad report configuration before touching stdio.
    config
        .report_config()
        .context("invalid report configuration")?;

    info!(preset = config.preset.as_str(), "starting MCP server on stdio");
    let service = LexdivServer::new(config, max_input)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;

    let reason = service.waiting().await.context("MCP server task failed")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
