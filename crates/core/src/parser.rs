use crate::error::ParseError;

/// Default Readability service endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.readability.com";

/// Path of the content parser API
pub const PARSER_PATH: &str = "/api/content/v1/parser";

/// Decoded parser response. The document schema is owned by the remote service.
pub type Article = serde_json::Value;

/// Outcome of a single parse request
pub type ParseResult = Result<Article, ParseError>;

/// Serialize query parameters in the given order
///
/// Both names and values are percent-encoded. Empty values are kept as `name=`.
pub fn serialize_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signed parser request URL
///
/// Produces `{base_url}/api/content/v1/parser?token={api_key}&url={article_url}`.
/// The article URL is not validated.
pub fn build_parser_url(base_url: &str, api_key: &str, article_url: &str) -> String {
    format!(
        "{}{}?{}",
        base_url.trim_end_matches('/'),
        PARSER_PATH,
        serialize_query(&[("token", api_key), ("url", article_url)])
    )
}

/// Only an exact 200 counts as success.
pub fn check_status(status: u16) -> Result<(), ParseError> {
    if status == 200 {
        Ok(())
    } else {
        Err(ParseError::Status { status })
    }
}

/// Decode a parser response body
///
/// A malformed body yields [`ParseError::Decode`]; it never panics.
pub fn decode_article(body: &str) -> ParseResult {
    serde_json::from_str(body).map_err(|e| ParseError::Decode {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    // ============================================================================
    // build_parser_url tests
    // ============================================================================

    #[test]
    fn test_build_parser_url_reference_values() {
        assert_eq!(
            build_parser_url(DEFAULT_BASE_URL, "TESTKEY", "http://example.com/x"),
            "https://www.readability.com/api/content/v1/parser?token=TESTKEY&url=http%3A%2F%2Fexample.com%2Fx"
        );
    }

    #[test]
    fn test_build_parser_url_is_deterministic() {
        let first = build_parser_url(DEFAULT_BASE_URL, "k3y", "https://example.com/a?b=c");
        let second = build_parser_url(DEFAULT_BASE_URL, "k3y", "https://example.com/a?b=c");
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_parser_url_encodes_key() {
        let url = build_parser_url(DEFAULT_BASE_URL, "a b&c", "http://example.com");
        assert!(url.contains("?token=a%20b%26c&url="));
    }

    #[test]
    fn test_build_parser_url_encodes_article_query() {
        let url = build_parser_url(
            DEFAULT_BASE_URL,
            "key",
            "https://example.com/post?id=1&ref=home#top",
        );
        assert!(url.ends_with(
            "&url=https%3A%2F%2Fexample.com%2Fpost%3Fid%3D1%26ref%3Dhome%23top"
        ));
    }

    #[test]
    fn test_build_parser_url_empty_key_keeps_parameter() {
        assert_eq!(
            build_parser_url(DEFAULT_BASE_URL, "", "x"),
            "https://www.readability.com/api/content/v1/parser?token=&url=x"
        );
    }

    #[test]
    fn test_build_parser_url_token_before_url() {
        let url = build_parser_url(DEFAULT_BASE_URL, "zzz", "aaa");
        let token = url.find("token=").unwrap();
        let article = url.find("url=").unwrap();
        assert!(token < article);
    }

    #[test]
    fn test_build_parser_url_custom_base_trailing_slash() {
        assert_eq!(
            build_parser_url("http://127.0.0.1:8080/", "k", "u"),
            "http://127.0.0.1:8080/api/content/v1/parser?token=k&url=u"
        );
    }

    #[test]
    fn test_build_parser_url_encodes_unicode() {
        let url = build_parser_url(DEFAULT_BASE_URL, "k", "https://example.com/café");
        assert!(url.ends_with("caf%C3%A9"));
    }

    // ============================================================================
    // serialize_query tests
    // ============================================================================

    #[test]
    fn test_serialize_query_empty() {
        assert_eq!(serialize_query(&[]), "");
    }

    #[test]
    fn test_serialize_query_keeps_order() {
        assert_eq!(serialize_query(&[("b", "2"), ("a", "1")]), "b=2&a=1");
    }

    #[test]
    fn test_serialize_query_unreserved_untouched() {
        assert_eq!(serialize_query(&[("k", "AZaz09-_.~")]), "k=AZaz09-_.~");
    }

    // ============================================================================
    // check_status tests
    // ============================================================================

    #[test]
    fn test_check_status_ok() {
        assert!(check_status(200).is_ok());
    }

    #[test]
    fn test_check_status_other_success_codes_rejected() {
        assert_eq!(check_status(201), Err(ParseError::Status { status: 201 }));
        assert_eq!(check_status(204), Err(ParseError::Status { status: 204 }));
    }

    #[test]
    fn test_check_status_not_found() {
        assert_eq!(check_status(404), Err(ParseError::Status { status: 404 }));
    }

    // ============================================================================
    // decode_article tests
    // ============================================================================

    #[test]
    fn test_decode_article_object() {
        let article = decode_article(r#"{"excerpt":"hi"}"#).unwrap();
        assert_eq!(article, json!({"excerpt": "hi"}));
    }

    #[test]
    fn test_decode_article_passes_unknown_fields_through() {
        let article =
            decode_article(r#"{"title":"T","word_count":12,"rendered_pages":1,"x":[1,2]}"#)
                .unwrap();
        assert_eq!(article["x"], json!([1, 2]));
        assert_eq!(article["word_count"], json!(12));
    }

    #[test]
    fn test_decode_article_malformed() {
        let err = decode_article("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_decode_article_empty_body() {
        let err = decode_article("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
