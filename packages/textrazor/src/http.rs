//! HTTP transport for talking to the TextRazor service.
//!
//! The clients only ever see the [`Transport`] trait: one synchronous round
//! trip in, status and raw bytes out. [`HttpTransport`] is the production
//! implementation on top of `reqwest::blocking`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::{ClientConfig, API_KEY_HEADER};
use crate::error::{AnalysisError, NetworkError, Result};

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("textrazor-rust/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body bytes quoted in a status error.
const ERROR_BODY_SNIPPET: usize = 512;

/// HTTP verbs used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// `application/x-www-form-urlencoded`; keys may repeat.
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

/// One round trip to the service, minus credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl TransportRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Value of the first form field with this name, if any.
    #[must_use]
    pub fn form_value<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        self.form_values(key).next()
    }

    /// Every value of a (possibly repeated) form field.
    pub fn form_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let fields: &[(String, String)] = match &self.body {
            Body::Form(fields) => fields,
            _ => &[],
        };
        fields
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Lossy UTF-8 excerpt of the body, for error messages.
    #[must_use]
    pub fn body_snippet(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        match text.char_indices().nth(ERROR_BODY_SNIPPET) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.into_owned(),
        }
    }
}

/// Synchronous request/response exchange with the service.
///
/// Non-2xx replies are *not* errors at this level; they come back as a
/// `RawResponse` so the caller can decode the service's error payload.
pub trait Transport {
    fn send(&self, request: &TransportRequest, api_key: &str) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &TransportRequest, api_key: &str) -> Result<RawResponse> {
        (**self).send(request, api_key)
    }
}

/// `reqwest::blocking` transport against a fixed base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with the configured timeout and user agent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url_for(&self, request: &TransportRequest) -> Result<Url> {
        let mut url =
            Url::parse(&format!("{}{}", self.base_url, request.path)).map_err(NetworkError::Url)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &TransportRequest, api_key: &str) -> Result<RawResponse> {
        let url = self.url_for(request)?;

        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            "Sending request"
        );

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), url)
            .header(API_KEY_HEADER, api_key);

        builder = match &request.body {
            Body::Empty => builder,
            Body::Form(fields) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish();
                builder
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(encoded)
            }
            Body::Json(value) => {
                let bytes = serde_json::to_vec(value).map_err(|e| {
                    AnalysisError::InvalidRequest(format!("cannot encode JSON body: {e}"))
                })?;
                builder.header(CONTENT_TYPE, "application/json").body(bytes)
            }
        };

        let response = builder.send().map_err(|e| {
            tracing::warn!(error = %e, path = %request.path, "Request failed");
            NetworkError::Http(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(NetworkError::Http)?.to_vec();

        tracing::debug!(status, bytes = body.len(), "Received reply");

        Ok(RawResponse { status, body })
    }
}

/// Test utilities for the transport.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::error::{AnalysisError, TextRazorError};

    /// In-memory transport. Replays canned replies in order and records
    /// every request it was given.
    #[derive(Default)]
    pub struct MockTransport {
        replies: Mutex<VecDeque<RawResponse>>,
        requests: Mutex<Vec<(TransportRequest, String)>>,
    }

    impl MockTransport {
        pub fn new(replies: Vec<RawResponse>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// A transport answering every call with one 200 JSON reply.
        pub fn with_json(body: &serde_json::Value) -> Self {
            Self::new(vec![RawResponse::new(200, body.to_string())])
        }

        pub fn push(&self, reply: RawResponse) {
            if let Ok(mut replies) = self.replies.lock() {
                replies.push_back(reply);
            }
        }

        /// Requests seen so far, with the API key they were sent with.
        pub fn requests(&self) -> Vec<(TransportRequest, String)> {
            self.requests
                .lock()
                .map(|r| r.clone())
                .unwrap_or_default()
        }

        pub fn last_request(&self) -> Option<TransportRequest> {
            self.requests().pop().map(|(request, _)| request)
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: &TransportRequest, api_key: &str) -> Result<RawResponse> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push((request.clone(), api_key.to_string()));
            }
            self.replies
                .lock()
                .ok()
                .and_then(|mut replies| replies.pop_front())
                .ok_or_else(|| {
                    TextRazorError::Analysis(AnalysisError::InvalidRequest(
                        "mock transport has no reply left".into(),
                    ))
                })
        }
    }
}
