//! Fetch Model
//!
//! Platform-neutral request/response pair seen by the fetch policy.

use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// Body of the synthetic response for non-HTML requests while offline
pub const OFFLINE_MESSAGE: &str = "You are offline. Please check your internet connection.";

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            url,
            method,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(accept));
        self
    }

    /// Whether the caller would take an HTML document
    pub fn accepts_html(&self) -> bool {
        self.headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains("text/html"))
    }
}

/// Response tainting, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin, fully readable
    Basic,
    Cors,
    Opaque,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub kind: ResponseKind,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            kind: ResponseKind::Basic,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self
    }

    /// Synthetic 503 for requests that neither cache nor network can serve
    pub fn offline() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, OFFLINE_MESSAGE).with_content_type("text/plain")
    }

    /// Only plain same-origin 200s are written back into the cache
    pub fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK && self.kind == ResponseKind::Basic
    }

    /// Statuses whose responses must not carry a body (101, 103, 204, 205, 304)
    pub fn has_null_body(&self) -> bool {
        matches!(self.status.as_u16(), 101 | 103 | 204 | 205 | 304)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    }
}

/// Where a served response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
    /// Cached app shell standing in for an unreachable page
    Shell,
    Offline,
}

/// Result of running a request through the fetch policy
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Not ours to handle; let the platform do the request
    Passthrough,
    Respond(Response, ResponseSource),
}
