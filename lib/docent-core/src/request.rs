//! Documented HTTP request building.
//!
//! A [`Request`] is the fully resolved form handed to the HTTP client
//! collaborator: method, substituted path (query suffix included), resolved
//! headers, and the body chosen by the method's encoding rules.
//!
//! # Example
//!
//! ```
//! use docent_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "/orders?page=1")
//!     .header("Accept", "application/json")
//!     .build();
//! assert_eq!(request.path(), "/orders?page=1");
//! ```

use bytes::Bytes;
use indexmap::IndexMap;
use serde_json::Value;

use crate::Method;

/// Payload of a documented request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body; parameters, if any, travel in the query string.
    #[default]
    None,
    /// Structured parameter mapping for a JSON-capable transport.
    Structured(IndexMap<String, Value>),
    /// Raw override, sent verbatim without serialization.
    Raw(Bytes),
}

impl RequestBody {
    /// Returns `true` if no body is present.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Metadata representation of the body.
    ///
    /// Structured mappings keep their nesting; raw overrides record as
    /// (lossy) UTF-8 text; an absent body records as `null`.
    #[must_use]
    pub fn to_metadata(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Structured(params) => Value::Object(
                params
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            Self::Raw(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// An HTTP request with method, path, headers, and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    headers: IndexMap<String, String>,
    body: RequestBody,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Resolved path, query suffix included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request headers, in declaration order.
    #[must_use]
    pub const fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Consume into (method, path, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, IndexMap<String, String>, RequestBody) {
        (self.method, self.path, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    path: String,
    headers: IndexMap<String, String>,
    body: RequestBody,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: IndexMap::new(),
            body: RequestBody::None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the structured parameter body.
    #[must_use]
    pub fn structured(mut self, params: IndexMap<String, Value>) -> Self {
        self.body = RequestBody::Structured(params);
        self
    }

    /// Sets a raw body override.
    #[must_use]
    pub fn raw(mut self, bytes: impl Into<Bytes>) -> Self {
        self.body = RequestBody::Raw(bytes.into());
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            headers: self.headers,
            body: self.body,
        }
    }
}
