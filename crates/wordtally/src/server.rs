//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the analysis engine over MCP so AI assistants can call it via
//! stdio transport. Each `#[tool]` method delegates to `wordtally_core`;
//! no counting logic lives here.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use wordtally_core::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_TOP_WORDS, format_report, stats};

use crate::commands::analyze::AnalyzeOutput;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_info_format")]
    pub format: String,
}

fn default_info_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Number of ranked words to return. Defaults to the server setting.
    pub top: Option<usize>,
    /// Output format: "json" (statistics and ranking) or "report" (plain text).
    #[serde(default = "default_analyze_format")]
    pub format: String,
}

fn default_analyze_format() -> String {
    "json".to_string()
}

/// MCP server exposing the analysis engine.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    top_words: usize,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_WORDS, Some(DEFAULT_MAX_INPUT_BYTES))
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with the given ranking size and input limit.
    pub fn new(top_words: usize, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            top_words,
            max_input_bytes,
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

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Count words, characters, sentences, and paragraphs.
    #[tool(
        description = "Analyze plain text. Returns word, character, sentence, and paragraph counts plus the most frequent words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let top = params.top.unwrap_or(self.top_words);
        tracing::debug!(
            tool = "analyze_text",
            top,
            bytes = params.text.len(),
            "executing MCP tool"
        );

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        let stats = stats::analyze(&params.text)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let text = match params.format.as_str() {
            "report" | "text" => format_report(&stats, top),
            "json" => serde_json::to_string_pretty(&AnalyzeOutput::new(&stats, top))
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?,
            other => {
                return Err(McpError::invalid_params(
                    format!("unknown format: {other} (expected \"json\" or \"report\")"),
                    None,
                ));
            }
        };

        tracing::info!(
            tool = "analyze_text",
            words = stats.word_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
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
                "{} MCP server. Use analyze_text to count words, characters, sentences, and paragraphs.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::default();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = ProjectServer::default();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn analyze_params(text: &str, top: Option<usize>, format: &str) -> Parameters<AnalyzeTextParams> {
        Parameters(AnalyzeTextParams {
            text: text.to_string(),
            top,
            format: format.to_string(),
        })
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::default();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value =
            serde_json::from_str(text).expect("output should be valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn analyze_text_returns_counts() {
        let server = ProjectServer::default();
        let result = server
            .analyze_text(analyze_params("Hello world. Hello again!", None, "json"))
            .expect("analyze_text should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["word_count"], 4);
        assert_eq!(json["sentence_count"], 2);
        assert_eq!(json["top_words"][0]["word"], "hello");
        assert_eq!(json["top_words"][0]["count"], 2);
    }

    #[test]
    fn analyze_text_report_format() {
        let server = ProjectServer::default();
        let result = server
            .analyze_text(analyze_params("a a b", Some(1), "report"))
            .expect("analyze_text should succeed");

        let text = extract_text(&result).expect("should have text content");
        assert!(text.starts_with("=== TEXT ANALYSIS RESULTS ===\n"));
        assert!(text.contains("=== TOP 1 MOST FREQUENT WORDS ==="));
        assert!(text.contains("1. a: 2 times"));
        assert!(!text.contains("2. b"));
    }

    #[test]
    fn analyze_text_rejects_empty_input() {
        let server = ProjectServer::default();
        let err = server
            .analyze_text(analyze_params("  \n ", None, "json"))
            .unwrap_err();
        assert!(err.message.contains("Text cannot be empty"));
    }

    #[test]
    fn analyze_text_enforces_limit() {
        let server = ProjectServer::new(10, Some(4));
        assert!(
            server
                .analyze_text(analyze_params("too long", None, "json"))
                .is_err()
        );
    }

    #[test]
    fn analyze_text_rejects_unknown_format() {
        let server = ProjectServer::default();
        assert!(
            server
                .analyze_text(analyze_params("words", None, "xml"))
                .is_err()
        );
    }
}
