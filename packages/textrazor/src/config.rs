//! Configuration constants, client configuration and identifier validation.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Result, TextRazorError};

/// Base URL of the TextRazor service.
pub const DEFAULT_BASE_URL: &str = "https://api.textrazor.com";

/// HTTP timeout in seconds.
///
/// Analysis of long documents with many extractors can take several seconds
/// server-side, so this is more generous than a typical API call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-TextRazor-Key";

/// Path of the dictionary resource, relative to the base URL.
pub const DICTIONARY_ROOT: &str = "/entities/";

/// Page size used by `DictionaryManager::all_entries`.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "TEXTRAZOR_API_KEY";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "TEXTRAZOR_BASE_URL";

/// Environment variable overriding the HTTP timeout.
pub const ENV_TIMEOUT_SECS: &str = "TEXTRAZOR_TIMEOUT_SECS";

/// Identifier pattern for dictionaries and entries.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid regex"));

/// Connection settings shared by the analysis and dictionary clients.
///
/// `Debug` is implemented by hand so the API key never ends up in logs.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| TextRazorError::Config(format!("{ENV_API_KEY} not set")))?;

        let mut builder = Self::builder(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let timeout_secs = timeout.trim().parse().map_err(|_| {
                TextRazorError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{timeout}'"
                ))
            })?;
            builder = builder.timeout_secs(timeout_secs);
        }
        builder.build()
    }

    /// Start building a configuration around an API key.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Builder for `ClientConfig`.
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Finish the configuration.
    ///
    /// Fails if the API key is blank or the timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        if self.api_key.trim().is_empty() {
            return Err(TextRazorError::Config("API key is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(TextRazorError::Config("timeout must be positive".into()));
        }

        Ok(ClientConfig {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Validate a dictionary or entry identifier.
///
/// Identifiers become URL path segments, so only a conservative character
/// set is accepted.
///
/// # Examples
/// ```
/// use textrazor::config::validate_id;
///
/// assert!(validate_id("developers").is_ok());
/// assert!(validate_id("DEV2").is_ok());
/// assert!(validate_id("../admin").is_err());
/// assert!(validate_id("..").is_err());
/// assert!(validate_id("").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<()> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(TextRazorError::InvalidId(id.to_string()))
    }
}

/// `.` and `..` would be dot segments that URL normalisation removes.
fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id) && !id.chars().all(|c| c == '.')
}

/// Path of a single dictionary.
///
/// # Panics
/// Debug builds panic if `dict_id` was not validated first.
pub fn dictionary_path(dict_id: &str) -> String {
    debug_assert!(
        is_valid_id(dict_id),
        "dict_id should be validated before calling dictionary_path"
    );
    format!("{DICTIONARY_ROOT}{dict_id}")
}

/// Path used to bulk-insert entries into a dictionary.
pub fn dictionary_entries_path(dict_id: &str) -> String {
    format!("{}/", dictionary_path(dict_id))
}

/// Path of a single dictionary entry.
pub fn entry_path(dict_id: &str, entry_id: &str) -> String {
    debug_assert!(
        is_valid_id(entry_id),
        "entry_id should be validated before calling entry_path"
    );
    format!("{}/{entry_id}", dictionary_path(dict_id))
}

/// Path of the paged entry listing of a dictionary.
pub fn all_entries_path(dict_id: &str) -> String {
    format!("{}/_all", dictionary_path(dict_id))
}
