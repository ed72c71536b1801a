//! HTTP client seam.
//!
//! The engine never performs transport itself; it hands a fully resolved
//! [`Request`] to an [`HttpDispatch`] collaborator and records whatever
//! comes back. [`RecordingClient`] is the in-memory implementation used by
//! documenting tests: it captures every dispatched request and answers
//! from a scripted response queue.

use std::collections::VecDeque;

use docent_core::{Request, Response, Result};

/// Dispatches one request against the application under test.
///
/// Implementations own transport policy entirely - timeouts, retries, and
/// failures all belong to the collaborator and surface verbatim.
pub trait HttpDispatch {
    /// Execute the request and return the response.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying transport produced.
    fn dispatch(&mut self, request: Request) -> Result<Response>;

    /// The response to the most recent successful dispatch, if any.
    fn last_response(&self) -> Option<&Response>;
}

/// In-memory [`HttpDispatch`] double with scripted responses.
///
/// Responses queue in FIFO order via [`respond_with`]; once the queue is
/// drained every dispatch answers `200` with no body. Dispatched requests
/// are kept for assertions.
///
/// [`respond_with`]: RecordingClient::respond_with
#[derive(Debug, Default)]
pub struct RecordingClient {
    scripted: VecDeque<Response>,
    failures: VecDeque<String>,
    requests: Vec<Request>,
    last: Option<Response>,
}

impl RecordingClient {
    /// Create a client answering `200` to everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted response for a future dispatch.
    pub fn respond_with(&mut self, response: Response) {
        self.scripted.push_back(response);
    }

    /// Make the next dispatch fail with the given transport message.
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failures.push_back(message.into());
    }

    /// Requests dispatched so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// The most recently dispatched request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<&Request> {
        self.requests.last()
    }
}

impl HttpDispatch for RecordingClient {
    fn dispatch(&mut self, request: Request) -> Result<Response> {
        self.requests.push(request);
        if let Some(message) = self.failures.pop_front() {
            return Err(docent_core::Error::client(message));
        }
        let response = self
            .scripted
            .pop_front()
            .unwrap_or_else(|| Response::with_status(200));
        self.last = Some(response.clone());
        Ok(response)
    }

    fn last_response(&self) -> Option<&Response> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use docent_core::Method;
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn answers_scripted_responses_in_order() {
        let mut client = RecordingClient::new();
        client.respond_with(Response::new(201, IndexMap::new(), "created"));

        let first = client
            .dispatch(Request::builder(Method::Post, "/orders").build())
            .expect("dispatch");
        assert_eq!(first.status(), 201);

        let second = client
            .dispatch(Request::builder(Method::Get, "/orders").build())
            .expect("dispatch");
        assert_eq!(second.status(), 200);
    }

    #[test]
    fn records_requests_and_last_response() {
        let mut client = RecordingClient::new();
        client
            .dispatch(Request::builder(Method::Get, "/orders?page=1").build())
            .expect("dispatch");

        assert_eq!(client.requests().len(), 1);
        assert_eq!(
            client.last_request().map(Request::path),
            Some("/orders?page=1")
        );
        assert_eq!(client.last_response().map(Response::status), Some(200));
    }

    #[test]
    fn scripted_failures_surface_verbatim() {
        let mut client = RecordingClient::new();
        client.fail_with("connection refused");

        let err = client
            .dispatch(Request::builder(Method::Get, "/orders").build())
            .expect_err("should fail");
        assert_eq!(err.to_string(), "client error: connection refused");
        assert!(client.last_response().is_none());
    }
}
