use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use readability::Article;
use readability_core::summary::{strip_tags, summarize_article};

use super::{parse_article_data, ServiceOptions};

#[derive(Debug, clap::Args, Clone)]
pub struct ParseOptions {
    /// Article URL to send to the parser (e.g., "http://example.com/post")
    #[clap(env = "READABILITY_URL")]
    pub url: String,

    #[clap(flatten)]
    pub service: ServiceOptions,

    /// Output the raw parser document as JSON
    #[arg(long)]
    pub json: bool,

    /// Include the article body (as plain text) in the formatted output
    #[arg(long)]
    pub content: bool,
}

pub async fn run(options: ParseOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Parsing article: {}", options.url);
    }

    let article = parse_article_data(options.url.clone(), options.service.clone()).await?;

    if options.json {
        println!("{}", format_article_json(&article)?);
    } else {
        print!("{}", format_article_text(&article, options.content));
    }

    Ok(())
}

fn format_article_json(article: &Article) -> Result<String> {
    serde_json::to_string_pretty(article).map_err(|e| eyre!("Failed to serialize article: {e}"))
}

fn format_article_text(article: &Article, include_content: bool) -> String {
    let summary = summarize_article(article);
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        summary
            .title
            .as_deref()
            .unwrap_or("(No title)")
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if let Some(url) = &summary.url {
        result.push_str(&format!("{}: {}\n", "URL".green(), url.cyan().underline()));
    }

    result.push_str(&format!(
        "{}: {} | {}: {} | {}: {}\n",
        "By".green(),
        summary.author.as_deref().unwrap_or("unknown").bright_white(),
        "Domain".green(),
        summary.domain.as_deref().unwrap_or("unknown").bright_white(),
        "Words".green(),
        summary
            .word_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string())
            .bright_yellow(),
    ));

    if let Some(date) = &summary.date_published {
        result.push_str(&format!("{}: {}\n", "Published".green(), date.bright_black()));
    }

    if let Some(image) = &summary.lead_image_url {
        result.push_str(&format!("{}: {}\n", "Image".green(), image.cyan()));
    }

    if let Some(excerpt) = &summary.excerpt {
        result.push_str(&format!("\n{}\n", excerpt.white()));
    }

    if include_content {
        let content = article
            .get("content")
            .and_then(|c| c.as_str())
            .map(strip_tags)
            .unwrap_or_default();

        result.push_str(&format!("\n{}\n", "-".repeat(80).bright_black()));
        if content.trim().is_empty() {
            result.push_str(&format!("{}\n", "No content returned.".yellow()));
        } else {
            result.push_str(&format!("{}\n", content.trim()));
        }
    }

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_article() -> Article {
        json!({
            "title": "Test Article",
            "author": "testuser",
            "domain": "example.com",
            "url": "http://example.com/x",
            "word_count": 42,
            "date_published": "2013-01-02",
            "excerpt": "Short &amp; sweet",
            "content": "<div><p>First paragraph.</p><p>Second.</p></div>"
        })
    }

    #[test]
    fn test_format_article_json_roundtrips_fields() {
        let json = format_article_json(&create_test_article()).unwrap();

        assert!(json.contains("\"title\": \"Test Article\""));
        assert!(json.contains("\"word_count\": 42"));
    }

    #[test]
    fn test_format_article_text_summary() {
        let text = format_article_text(&create_test_article(), false);

        assert!(text.contains("Test Article"));
        assert!(text.contains("testuser"));
        assert!(text.contains("example.com"));
        assert!(text.contains("42"));
        assert!(text.contains("Short & sweet"));
        assert!(!text.contains("First paragraph."));
    }

    #[test]
    fn test_format_article_text_with_content() {
        let text = format_article_text(&create_test_article(), true);

        assert!(text.contains("First paragraph.Second."));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_format_article_text_missing_fields() {
        let text = format_article_text(&json!({}), true);

        assert!(text.contains("(No title)"));
        assert!(text.contains("unknown"));
        assert!(text.contains("No content returned."));
    }
}
