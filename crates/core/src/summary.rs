use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Fields of a parsed article shown by the formatted CLI output
///
/// Every field is optional: the document comes from the remote service and
/// nothing about its shape is guaranteed.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ArticleSummary {
    pub title: Option<String>,
    pub author: Option<String>,
    pub domain: Option<String>,
    pub url: Option<String>,
    pub date_published: Option<String>,
    pub word_count: Option<u64>,
    pub excerpt: Option<String>,
    pub lead_image_url: Option<String>,
}

fn string_field(article: &Value, key: &str) -> Option<String> {
    article
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Project a parsed article into an [`ArticleSummary`]
pub fn summarize_article(article: &Value) -> ArticleSummary {
    ArticleSummary {
        title: string_field(article, "title"),
        author: string_field(article, "author"),
        domain: string_field(article, "domain"),
        url: string_field(article, "url"),
        date_published: string_field(article, "date_published"),
        word_count: article.get("word_count").and_then(Value::as_u64),
        excerpt: string_field(article, "excerpt").map(|e| strip_tags(&e)),
        lead_image_url: string_field(article, "lead_image_url"),
    }
}

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Remove markup from a text fragment and decode the common HTML entities
pub fn strip_tags(text: &str) -> String {
    TAG_RE
        .replace_all(text, "")
        .replace("&hellip;", "...")
        .replace("&nbsp;", " ")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
