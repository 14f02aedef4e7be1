use crate::article::ServiceOptions;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{CallToolResult, Content, JsonRpcError};

#[derive(Deserialize)]
struct ParserArgs {
    url: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout: Option<u64>,
}

fn parse_args(arguments: Option<serde_json::Value>) -> Result<ParserArgs, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
        JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {e}"),
            data: None,
        }
    })
}

fn tool_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Tool execution error: {e}"),
        data: None,
    }
}

fn text_result(text: String) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_parse(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling readability_parse: url={}, timeout={:?}",
            args.url, args.timeout
        );
    }

    let service = ServiceOptions {
        api_key: args.api_key,
        base_url: args.base_url,
        timeout: args.timeout,
    };

    let article = crate::article::parse_article_data(args.url, service)
        .await
        .map_err(tool_error)?;

    let json_string = serde_json::to_string_pretty(&article).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    text_result(json_string)
}

pub fn handle_url(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling readability_url: url={}", args.url);
    }

    let service = ServiceOptions {
        api_key: args.api_key,
        base_url: args.base_url,
        ..ServiceOptions::default()
    };

    let url = crate::article::request_url_data(args.url, service).map_err(tool_error)?;

    text_result(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readability_core::parser::PARSER_PATH;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn global() -> crate::Global {
        crate::Global { verbose: false }
    }

    #[test]
    fn test_handle_url_with_api_key() {
        let result = handle_url(
            Some(json!({"url": "http://example.com/x", "api_key": "TESTKEY"})),
            &global(),
        )
        .unwrap();

        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.ends_with("/api/content/v1/parser?token=TESTKEY&url=http%3A%2F%2Fexample.com%2Fx"));
        assert_eq!(result["content"][0]["type"], "text");
    }

    #[test]
    fn test_handle_url_missing_url() {
        let err = handle_url(Some(json!({"api_key": "k"})), &global()).unwrap_err();
        assert_eq!(err.code, -32602);
        assert!(err.message.starts_with("Invalid arguments"));
    }

    #[test]
    fn test_handle_url_no_arguments() {
        let err = handle_url(None, &global()).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[tokio::test]
    async fn test_handle_parse_invalid_arguments() {
        let err = handle_parse(Some(json!({"url": 5})), &global())
            .await
            .unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[tokio::test]
    async fn test_handle_parse_returns_pretty_article() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PARSER_PATH))
            .and(query_param("token", "TOOLKEY"))
            .and(query_param("url", "http://example.com/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"title": "T", "excerpt": "hi"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = handle_parse(
            Some(json!({
                "url": "http://example.com/x",
                "api_key": "TOOLKEY",
                "base_url": server.uri(),
                "timeout": 5
            })),
            &global(),
        )
        .await
        .unwrap();

        assert_eq!(result["content"][0]["type"], "text");
        assert!(result.get("isError").is_none());

        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\n  \"title\": \"T\""));
        let article: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(article, json!({"title": "T", "excerpt": "hi"}));
    }

    #[tokio::test]
    async fn test_handle_parse_status_error_is_tool_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PARSER_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = handle_parse(
            Some(json!({
                "url": "http://example.com/missing",
                "api_key": "k",
                "base_url": server.uri(),
                "timeout": 5
            })),
            &global(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, -32603);
        assert!(err.message.starts_with("Tool execution error"));
        assert!(err.message.contains("Unexpected HTTP status: 404"));
    }

    #[test]
    fn test_handle_url_custom_base_url() {
        let result = handle_url(
            Some(json!({
                "url": "u",
                "api_key": "k",
                "base_url": "http://127.0.0.1:9"
            })),
            &global(),
        )
        .unwrap();

        assert_eq!(
            result["content"][0]["text"],
            "http://127.0.0.1:9/api/content/v1/parser?token=k&url=u"
        );
    }
}
