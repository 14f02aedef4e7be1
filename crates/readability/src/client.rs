use crate::config::ClientConfig;
use crate::events::{isolate, HandlerOutcome, Observers, ParseEvent, SubscriptionId};
use readability_core::parser::{build_parser_url, check_status, decode_article};
use readability_core::{ParseError, ParseResult};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

const USER_AGENT: &str = concat!("readability/", env!("CARGO_PKG_VERSION"));

/// Client for the Readability content parser API
///
/// Cloning is cheap and every clone shares the same key and observers, so a
/// single client can serve any number of concurrent [`parse`](Self::parse) calls.
#[derive(Debug, Clone)]
pub struct ArticleParserClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    parser_api_key: RwLock<Option<String>>,
    reader_api_key: Option<String>,
    base_url: String,
    observers: Observers,
}

impl std::fmt::Debug for Inner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inner")
            .field("base_url", &self.base_url)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl ArticleParserClient {
    /// Create a client. A missing parser key is accepted here and reported
    /// as [`ParseError::Config`] by the first request that needs it.
    pub fn new(config: ClientConfig) -> Result<Self, ParseError> {
        if config.timeout.is_zero() {
            return Err(ParseError::config("Request timeout must be greater than zero"));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ParseError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                parser_api_key: RwLock::new(config.parser_api_key),
                reader_api_key: config.reader_api_key,
                base_url: config.base_url,
                observers: Observers::new(),
            }),
        })
    }

    pub fn api_key(&self) -> Option<String> {
        self.inner
            .parser_api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the parser key. Requests already in flight keep the key they
    /// started with.
    pub fn set_api_key(&self, key: impl Into<String>) -> String {
        let key = key.into();
        *self
            .inner
            .parser_api_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(key.clone());
        key
    }

    pub fn reader_api_key(&self) -> Option<&str> {
        self.inner.reader_api_key.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Signed parser URL for `article_url` using the current key
    pub fn request_url(&self, article_url: &str) -> Result<String, ParseError> {
        let key = self
            .api_key()
            .ok_or_else(|| ParseError::config("Parser API key is not set"))?;

        Ok(build_parser_url(&self.inner.base_url, &key, article_url))
    }

    /// Parse an article
    ///
    /// Observers are notified before the result is returned. Dropping the
    /// returned future cancels the request.
    pub async fn parse(&self, article_url: &str) -> ParseResult {
        let result = self.fetch(article_url).await;

        match &result {
            Ok(_) => log::debug!("Parsed {article_url}"),
            Err(e) => log::warn!("Failed to parse {article_url}: {e}"),
        }

        self.inner.observers.notify(ParseEvent {
            article_url: article_url.to_string(),
            result: result.clone(),
        });

        result
    }

    /// Parse an article and hand the result to `on_result`
    ///
    /// A panic inside `on_result` is caught and logged; it is reported back as
    /// [`HandlerOutcome::Panicked`] instead of unwinding into the caller.
    pub async fn parse_with<F>(&self, article_url: &str, on_result: F) -> HandlerOutcome
    where
        F: FnOnce(&ParseResult),
    {
        let result = self.parse(article_url).await;

        let outcome = isolate(|| on_result(&result));
        if let HandlerOutcome::Panicked(message) = &outcome {
            log::error!("Result handler for {article_url} panicked: {message}");
        }

        outcome
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ParseEvent) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    /// Channel receiving every parse event emitted after this call
    pub fn events(&self) -> broadcast::Receiver<Arc<ParseEvent>> {
        self.inner.observers.receiver()
    }

    async fn fetch(&self, article_url: &str) -> ParseResult {
        let url = self.request_url(article_url)?;

        log::debug!("Requesting parser for {article_url}");

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response.status().as_u16())?;

        let body = response.text().await.map_err(transport_error)?;

        decode_article(&body)
    }
}

fn transport_error(e: reqwest::Error) -> ParseError {
    // The request URL carries the API key.
    let e = e.without_url();

    if e.is_timeout() {
        ParseError::timeout(e.to_string())
    } else {
        ParseError::transport(e.to_string())
    }
}
