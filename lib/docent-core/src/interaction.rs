//! Recorded request/response pairs.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{Method, Request, Response};

/// The recorded outcome of one request/response cycle.
///
/// Captured once per executed request, immutable afterwards. A test's
/// metadata accumulates these under its `"requests"` key for the reporting
/// pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    /// HTTP method of the dispatched request.
    pub method: Method,
    /// Resolved path, query suffix included.
    pub path: String,
    /// Resolved request headers.
    pub request_headers: IndexMap<String, String>,
    /// Request body as recorded for documentation.
    pub request_body: Value,
    /// Resolved parameter mapping, recorded when a raw body override
    /// bypassed serialization.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub request_params: Value,
    /// Response status code.
    pub response_status: u16,
    /// Response headers.
    pub response_headers: IndexMap<String, String>,
    /// Response body as (lossy) UTF-8 text.
    pub response_body: String,
}

impl Interaction {
    /// Record a dispatched request together with its response.
    #[must_use]
    pub fn record(request: &Request, response: &Response) -> Self {
        Self {
            method: request.method(),
            path: request.path().to_string(),
            request_headers: request.headers().clone(),
            request_body: request.body().to_metadata(),
            request_params: Value::Null,
            response_status: response.status(),
            response_headers: response.headers().clone(),
            response_body: String::from_utf8_lossy(response.body()).into_owned(),
        }
    }

    /// Attach the resolved parameter mapping alongside a raw body.
    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.request_params = params;
        self
    }

    /// Metadata representation of the interaction.
    #[must_use]
    pub fn to_metadata(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn records_request_and_response() {
        let request = Request::builder(Method::Get, "/orders?page=1")
            .header("Accept", "application/json")
            .build();
        let response = Response::new(200, IndexMap::new(), r#"[{"id":1}]"#);

        let interaction = Interaction::record(&request, &response);

        assert_eq!(interaction.method, Method::Get);
        assert_eq!(interaction.path, "/orders?page=1");
        assert_eq!(
            interaction.request_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(interaction.request_body, json!(null));
        assert_eq!(interaction.response_status, 200);
        assert_eq!(interaction.response_body, r#"[{"id":1}]"#);
    }

    #[test]
    fn metadata_round_trip() {
        let request = Request::builder(Method::Post, "/orders").build();
        let response = Response::with_status(201);

        let value = Interaction::record(&request, &response).to_metadata();

        assert_eq!(value["method"], json!("POST"));
        assert_eq!(value["path"], json!("/orders"));
        assert_eq!(value["response_status"], json!(201));
    }
}
