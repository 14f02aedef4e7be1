use crate::prelude::*;
use readability::{Article, ArticleParserClient, ClientConfig};
use std::time::Duration;

pub mod parse;
pub mod url;

/// Options shared by every command that talks to the parser service
///
/// Unset options fall back to the `READABILITY_*` environment variables.
#[derive(Debug, clap::Args, Clone, Default)]
pub struct ServiceOptions {
    /// Parser API key
    #[arg(long, env = "READABILITY_PARSER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Parser service base URL (default: https://www.readability.com)
    #[arg(long, env = "READABILITY_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[arg(short, long, env = "READABILITY_TIMEOUT")]
    pub timeout: Option<u64>,
}

/// Merge the command line overrides into the configuration read through `lookup`
pub fn client_config<F>(service: ServiceOptions, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(ClientConfig::from_lookup(lookup)
        .wrap_err("Invalid Readability configuration")?
        .with_overrides(
            service.api_key,
            service.base_url,
            service.timeout.map(Duration::from_secs),
        ))
}

/// Build a client from the environment plus command line overrides
pub fn create_client(service: ServiceOptions) -> Result<ArticleParserClient> {
    let config = client_config(service, |name| std::env::var(name).ok())?;

    ArticleParserClient::new(config).wrap_err("Failed to create Readability client")
}

/// Parses an article and returns the document produced by the parser service
pub async fn parse_article_data(url: String, service: ServiceOptions) -> Result<Article> {
    let client = create_client(service)?;

    client
        .parse(&url)
        .await
        .map_err(|e| eyre!("Failed to parse {}: {}", url, e))
}

/// Returns the signed parser request URL without sending it
pub fn request_url_data(url: String, service: ServiceOptions) -> Result<String> {
    let client = create_client(service)?;

    client
        .request_url(&url)
        .map_err(|e| eyre!("Failed to build request URL: {e}"))
}
