//! Configuration for the HTTP bridge

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::endpoint::parse_base_url;
use crate::error::{BridgeError, Result};

/// Environment variable holding the upstream base URL
pub const API_BASE_ENV: &str = "VENICE_API_BASE";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "VENICE_API_KEY";

/// Environment variable selecting the dispatch mode
pub const DISPATCH_ENV: &str = "VENICE_BRIDGE_DISPATCH";

/// Base URL used when [`API_BASE_ENV`] is unset
pub const DEFAULT_API_BASE: &str = "https://api.venice.ai";

/// How input lines are scheduled relative to each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// One request at a time; output order equals input order
    #[default]
    Sequential,
    /// Every line is handled on its own task; a fast later request may be
    /// answered before a slow earlier one
    Concurrent,
}

impl FromStr for DispatchMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(BridgeError::Config(format!(
                "{DISPATCH_ENV} must be \"sequential\" or \"concurrent\", got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// Bridge configuration, read once at startup and immutable afterwards.
#[derive(Debug)]
pub struct BridgeConfig {
    /// Upstream base URL; request paths are appended to it
    pub base_url: Url,

    /// Bearer token; may be empty
    pub api_key: SecretString,

    /// Scheduling of input lines
    pub dispatch: DispatchMode,
}

impl BridgeConfig {
    /// Create a configuration from explicit values
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: SecretString::new(api_key.into().into_boxed_str()),
            dispatch: DispatchMode::default(),
        })
    }

    /// Set the dispatch mode
    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `VENICE_API_BASE` for the base URL (default `https://api.venice.ai`)
    /// - `VENICE_API_KEY` for the API key (default empty)
    /// - `VENICE_BRIDGE_DISPATCH` for the dispatch mode (default sequential)
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Result<Self> {
        use std::env;

        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.is_empty());

        let base_url = non_empty(API_BASE_ENV).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_key = non_empty(API_KEY_ENV).unwrap_or_default();

        let mut config = Self::new(&base_url, api_key)?;

        if let Some(mode) = non_empty(DISPATCH_ENV) {
            config.dispatch = mode.parse()?;
        }

        Ok(config)
    }

    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// Value of the `Authorization` header sent upstream
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Emit the startup warning when no API key is set.
    ///
    /// Returns whether a warning was emitted. Requests still proceed.
    pub fn warn_if_missing_api_key(&self) -> bool {
        if self.has_api_key() {
            return false;
        }
        tracing::warn!(
            "{} is not set; upstream requests will likely be rejected with 401",
            API_KEY_ENV
        );
        true
    }
}
