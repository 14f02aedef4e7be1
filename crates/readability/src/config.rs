use readability_core::parser::DEFAULT_BASE_URL;
use readability_core::ParseError;
use std::time::Duration;

/// Request timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Readability client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub parser_api_key: Option<String>,
    pub reader_api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            parser_api_key: None,
            reader_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(parser_api_key: impl Into<String>) -> Self {
        Self {
            parser_api_key: Some(parser_api_key.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads `READABILITY_PARSER_API_KEY`, `READABILITY_READER_API_KEY`,
    /// `READABILITY_BASE_URL` and `READABILITY_TIMEOUT` (seconds). Every variable
    /// is optional; a missing parser key is only an error once a request is made.
    pub fn from_env() -> Result<Self, ParseError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = match lookup("READABILITY_TIMEOUT") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ParseError::config(format!(
                        "READABILITY_TIMEOUT must be a positive number of seconds, got {raw:?}"
                    )))
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            parser_api_key: lookup("READABILITY_PARSER_API_KEY"),
            reader_api_key: lookup("READABILITY_READER_API_KEY"),
            base_url: lookup("READABILITY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(
        mut self,
        parser_api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        if let Some(key) = parser_api_key {
            self.parser_api_key = Some(key);
        }
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        self
    }
}
