//! Client for the Readability article parser API
//!
//! This crate is the **Imperative Shell** around [`readability_core`]: it owns the
//! HTTP client, the observer registry and the configuration, and delegates URL
//! construction and response decoding to the pure core.
//!
//! ```rust,no_run
//! use readability::{ArticleParserClient, ClientConfig};
//!
//! # async fn demo() -> Result<(), readability::ParseError> {
//! let client = ArticleParserClient::new(ClientConfig::new("my-parser-key"))?;
//! let article = client.parse("http://example.com/article").await?;
//! println!("{}", article["title"]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod events;

pub use client::ArticleParserClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use events::{HandlerOutcome, ParseEvent, SubscriptionId};
pub use readability_core::{Article, ErrorKind, ParseError, ParseResult};
