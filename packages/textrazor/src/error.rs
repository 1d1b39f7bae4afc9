//! Error types for the TextRazor client.
//!
//! Uses the dual-error pattern: `TextRazorError` for library consumers,
//! wrapping the two failure kinds a round trip can produce. `NetworkError`
//! covers everything that went wrong before a decodable reply arrived;
//! `AnalysisError` covers replies the service produced but that cannot be
//! turned into a result.

use thiserror::Error;

/// Transport-level failure: no decodable reply came back.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request failed (connection refused, timeout, invalid URL, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx reply whose body is not a service error payload.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// The service replied, but the reply is an error or cannot be decoded.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service returned a decodable error payload.
    #[error("TextRazor returned an error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The reply failed structural validation.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request was rejected before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Main error type for the client library.
#[derive(Debug, Error)]
pub enum TextRazorError {
    #[error("Network failure: {0}")]
    Network(#[from] NetworkError),

    #[error("Analysis failure: {0}")]
    Analysis(#[from] AnalysisError),

    /// Dictionary or entry identifier that cannot be used as a path segment.
    #[error("Invalid identifier: '{0}'. Expected letters, digits, '_', '-' or '.'")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TextRazorError {
    /// Whether the service reported that the addressed resource is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Analysis(AnalysisError::NotFound(_)))
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Analysis(AnalysisError::MalformedResponse(message.into()))
    }
}

impl From<reqwest::Error> for TextRazorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(NetworkError::Http(err))
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, TextRazorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextRazorError::InvalidId("a/b".to_string());
        assert!(err.to_string().contains("a/b"));
    }

    #[test]
    fn test_service_error_display() {
        let err: TextRazorError = AnalysisError::Service {
            status: 400,
            message: "Unsupported extractor".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Analysis failure: TextRazor returned an error (status 400): Unsupported extractor"
        );
    }

    #[test]
    fn test_is_not_found() {
        let err: TextRazorError = AnalysisError::NotFound("DEV2".to_string()).into();
        assert!(err.is_not_found());

        let err = TextRazorError::malformed("missing field");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_network_status_display() {
        let err: TextRazorError = NetworkError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Network failure"));
        assert!(err.to_string().contains("502"));
    }
}
