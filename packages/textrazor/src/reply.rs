//! Decoding of the service's JSON reply envelope.
//!
//! Every reply is a JSON object with an `ok` flag. Failed calls carry an
//! `error` (or `message`) string; successful calls carry their payload
//! under an operation-specific key.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AnalysisError, NetworkError, Result, TextRazorError};
use crate::http::RawResponse;

/// Extract the service error message from a reply body, if it has one.
fn error_message(value: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Map a failed reply onto the matching error.
///
/// A 404 is always a not-found failure. Otherwise a body the service
/// produced (JSON with an error message) is an analysis failure and
/// anything else is a network failure.
fn failure(raw: &RawResponse, value: Option<&Value>) -> TextRazorError {
    let message = value.and_then(error_message);

    if raw.status == 404 {
        let body = raw.body_snippet();
        let message = message
            .or_else(|| (!body.trim().is_empty()).then_some(body))
            .unwrap_or_else(|| "resource not found".into());
        return AnalysisError::NotFound(message).into();
    }

    match message {
        Some(message) => AnalysisError::Service {
            status: raw.status,
            message,
        }
        .into(),
        None if raw.is_success() => AnalysisError::Service {
            status: raw.status,
            message: "request reported failure without a message".into(),
        }
        .into(),
        None => NetworkError::Status {
            status: raw.status,
            body: raw.body_snippet(),
        }
        .into(),
    }
}

/// Check the envelope and decode the whole body as `T`.
pub fn decode_reply<T: DeserializeOwned>(raw: &RawResponse) -> Result<T> {
    let value = parse_envelope(raw)?;
    serde_json::from_value(value).map_err(|e| TextRazorError::malformed(e.to_string()))
}

/// Check the envelope of a reply whose payload is not needed.
pub fn expect_ok(raw: &RawResponse) -> Result<()> {
    parse_envelope(raw).map(|_| ())
}

fn parse_envelope(raw: &RawResponse) -> Result<Value> {
    let parsed = serde_json::from_slice::<Value>(&raw.body);

    if !raw.is_success() {
        tracing::warn!(status = raw.status, "Service replied with failure status");
        return Err(failure(raw, parsed.as_ref().ok()));
    }

    // Some successful calls (DELETE) may come back without a body.
    if raw.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let value = parsed.map_err(|e| TextRazorError::malformed(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(TextRazorError::malformed("reply is not a JSON object"));
    }

    if value.get("ok").and_then(Value::as_bool) == Some(false) {
        tracing::warn!(status = raw.status, "Service reported failure");
        return Err(failure(raw, Some(&value)));
    }

    Ok(value)
}
