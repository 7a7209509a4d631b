use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::http::mime::DEFAULT_MIME_TYPE;
use crate::http::status::{reason_phrase, StatusCode};
use crate::http::HTTP_VERSION;

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers live in a `BTreeMap` so the serialized order is stable.
#[derive(Debug, Clone)]
pub struct Response {
    /// Protocol version for the status line
    pub version: String,
    /// Status code token, e.g. "200"
    pub status: String,
    /// Reason phrase from the status table, or "UNKNOWN"
    pub reason: &'static str,
    /// HTTP headers as key-value pairs
    pub headers: BTreeMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new("200")
///     .content_type("text/html")
///     .body(b"<h1>hi</h1>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: String,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder. Any code is accepted; codes missing
    /// from the status table get the reason "UNKNOWN".
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets Content-Type. An empty string leaves the default in place.
    pub fn content_type(self, content_type: &str) -> Self {
        if content_type.is_empty() {
            self
        } else {
            self.header("Content-Type", content_type)
        }
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Content-Length always reflects the body, Date is the current time and
    /// Content-Type defaults to `application/octet-stream`.
    pub fn build(mut self) -> Response {
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
        self.headers.insert(
            "Date".to_string(),
            httpdate::fmt_http_date(SystemTime::now()),
        );
        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| DEFAULT_MIME_TYPE.to_string());

        Response {
            version: HTTP_VERSION.to_string(),
            reason: reason_phrase(&self.status),
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Builds a response from a content type, body and status code token.
    pub fn build(content_type: &str, body: Vec<u8>, status: &str) -> Self {
        ResponseBuilder::new(status)
            .content_type(content_type)
            .body(body)
            .build()
    }

    /// A `text/plain` response whose body is the status reason phrase.
    pub fn plain(status: StatusCode) -> Self {
        Self::build(
            "text/plain",
            status.reason_phrase().as_bytes().to_vec(),
            status.as_str(),
        )
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
