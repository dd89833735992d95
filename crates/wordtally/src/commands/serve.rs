//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{debug, info, instrument};

use wordtally_core::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve the analysis tools over MCP until the client disconnects.
///
/// Logs go to stderr or the log file; stdout carries the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    let max_input = config.input_limit();
    debug!(top_words = config.top_words, ?max_input, "executing serve command");

    let server = ProjectServer::new(config.top_words, max_input);
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    info!("MCP server running on stdio");

    let reason = service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;
    debug!(?reason, "MCP server stopped");
    Ok(())
}
