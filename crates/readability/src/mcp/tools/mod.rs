mod parser;

use serde::{Deserialize, Serialize};

pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn internal_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    }
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "readability".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "readability_parse".to_string(),
            description: "Extract the main content of a web article using the Readability parser API. Returns the parser document as JSON (title, author, excerpt, content HTML, word_count, date_published, ...). Requires the READABILITY_PARSER_API_KEY environment variable unless api_key is provided.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the article to parse"
                    },
                    "api_key": {
                        "type": "string",
                        "description": "Parser API key (overrides READABILITY_PARSER_API_KEY)"
                    },
                    "base_url": {
                        "type": "string",
                        "description": "Parser service base URL (overrides READABILITY_BASE_URL)"
                    },
                    "timeout": {
                        "type": "number",
                        "description": "Request timeout in seconds (default: 10)"
                    }
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "readability_url".to_string(),
            description: "Build the signed Readability parser request URL for an article without sending the request.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the article"
                    },
                    "api_key": {
                        "type": "string",
                        "description": "Parser API key (overrides READABILITY_PARSER_API_KEY)"
                    },
                    "base_url": {
                        "type": "string",
                        "description": "Parser service base URL (overrides READABILITY_BASE_URL)"
                    }
                },
                "required": ["url"]
            }),
        },
    ];

    serde_json::to_value(ToolsList { tools }).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "readability_parse" => parser::handle_parse(params.arguments, global).await,
        "readability_url" => parser::handle_url(params.arguments, global),
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
