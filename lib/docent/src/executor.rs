//! Request execution and interaction recording.
//!
//! [`TestRun`] is the per-test orchestrator: it resolves the scope chain
//! once at construction, stamps the documentation metadata, and turns
//! `do_request` calls into dispatched, recorded interactions.

use bytes::Bytes;
use docent_core::{
    Error, Interaction, Method, Request, RequestBody, ResolvedParameterSet, Response, Result,
    build_path, encode_query, path_placeholders,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::callback::{CallbackCoordinator, TestDestination};
use crate::headers::{HeaderValue, headers_to_metadata, resolve_headers};
use crate::registry::{ResolvedScope, ScopeId, ScopeRegistry};
use crate::serializer::serialize_params;
use crate::{Environment, HttpDispatch, Metadata};

const REQUESTS_KEY: &str = "requests";

/// One test's execution state: resolved declarations, bound values, the
/// client collaborator, and the metadata the reporting pass will read.
///
/// All state lives for exactly one test; nothing is shared across tests.
pub struct TestRun<C, M> {
    method: Method,
    route: String,
    parameters: ResolvedParameterSet,
    headers: IndexMap<String, HeaderValue>,
    env: Environment,
    raw_body: Option<Bytes>,
    callback: Option<CallbackCoordinator>,
    client: C,
    metadata: M,
}

impl<C, M> TestRun<C, M>
where
    C: HttpDispatch,
    M: Metadata,
{
    /// Resolve `leaf`'s scope chain and start a test run against it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEndpoint`] when no scope on the chain
    /// declared a method and route.
    pub fn new(registry: &ScopeRegistry, leaf: ScopeId, client: C, metadata: M) -> Result<Self> {
        let scope = registry.resolve_scope(leaf);
        let (method, route) = scope.endpoint.clone().ok_or(Error::MissingEndpoint)?;
        let mut run = Self {
            method,
            route,
            parameters: scope.parameters.clone(),
            headers: scope.headers.clone(),
            env: Environment::new(),
            raw_body: None,
            callback: None,
            client,
            metadata,
        };
        run.stamp_metadata(&scope);
        Ok(run)
    }

    fn stamp_metadata(&mut self, scope: &ResolvedScope) {
        if let Some(resource) = &scope.resource {
            self.metadata
                .set("resource_name", Value::String(resource.clone()));
        }
        self.metadata
            .set("method", Value::String(self.method.to_string()));
        self.metadata.set("route", Value::String(self.route.clone()));
        if !self.parameters.is_empty() {
            self.metadata
                .set("parameters", self.parameters.to_metadata());
        }
        if !self.headers.is_empty() {
            self.metadata
                .set("headers", headers_to_metadata(&self.headers));
        }
        if let Some(document) = &scope.document {
            self.metadata.set("document", document.clone());
        }
    }

    /// HTTP method under documentation.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Route template under documentation.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The test's value environment.
    #[must_use]
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the value environment.
    pub const fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Bind a named value for parameters, path variables, and headers.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.env.bind(name, value);
    }

    /// Bind a deferred value, evaluated at most once.
    pub fn bind_with(&mut self, name: impl Into<String>, thunk: impl Fn() -> Value + 'static) {
        self.env.bind_with(name, thunk);
    }

    /// Declare an additional header for this test only.
    pub fn add_header(&mut self, name: impl Into<String>, value: HeaderValue) {
        self.headers.insert(name.into(), value);
        self.metadata
            .set("headers", headers_to_metadata(&self.headers));
    }

    /// Set a raw body override; it is sent verbatim instead of the
    /// serialized parameter mapping.
    pub fn raw_body(&mut self, body: impl Into<Bytes>) {
        self.raw_body = Some(body.into());
    }

    /// The route with currently bound path variables substituted.
    #[must_use]
    pub fn path(&self) -> String {
        build_path(&self.route, |name| self.env.get(name))
    }

    /// The serialized parameter mapping for the current bindings.
    #[must_use]
    pub fn params(&self) -> IndexMap<String, Value> {
        serialize_params(
            &self.parameters,
            &self.env,
            &IndexMap::new(),
            &path_placeholders(&self.route),
        )
    }

    /// Declared headers resolved against the current bindings.
    #[must_use]
    pub fn resolved_headers(&self) -> IndexMap<String, String> {
        resolve_headers(&self.headers, &self.env)
    }

    /// Attach explanation text for the documentation output.
    pub fn explanation(&mut self, text: impl Into<String>) {
        self.metadata.set("explanation", Value::String(text.into()));
    }

    /// Build, dispatch, and record one request.
    ///
    /// Extras override bound values: keys matching a route placeholder are
    /// consumed by path substitution, the rest merge into the parameter
    /// mapping with highest precedence. Parameters travel in the query
    /// string or the body according to the method, and the resulting
    /// interaction is appended to the test metadata unless recording is
    /// suspended by [`no_doc`](Self::no_doc).
    ///
    /// # Errors
    ///
    /// Query encoding failures and client errors surface verbatim; nothing
    /// is recorded for a failed dispatch.
    pub fn do_request(&mut self, extra: &[(&str, Value)]) -> Result<Response> {
        let extra_map: IndexMap<String, Value> = extra
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();

        let placeholders = path_placeholders(&self.route);
        let path = build_path(&self.route, |name| {
            extra_map.get(name).cloned().or_else(|| self.env.get(name))
        });

        let params = serialize_params(&self.parameters, &self.env, &extra_map, &placeholders);
        let headers = resolve_headers(&self.headers, &self.env);

        let request = if self.method.carries_body() {
            let builder = Request::builder(self.method, path).headers(headers);
            match &self.raw_body {
                Some(raw) => builder.raw(raw.clone()).build(),
                None => builder.structured(params.clone()).build(),
            }
        } else {
            let query = encode_query(&params)?;
            let full_path = if query.is_empty() {
                path
            } else {
                format!("{path}?{query}")
            };
            Request::builder(self.method, full_path)
                .headers(headers)
                .build()
        };

        info!(method = %self.method, path = request.path(), "dispatching request");
        let response = self.client.dispatch(request.clone())?;

        let mut interaction = Interaction::record(&request, &response);
        if matches!(request.body(), RequestBody::Raw(_)) {
            interaction = interaction.with_params(Value::Object(
                params
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ));
        }
        self.record(interaction);

        Ok(response)
    }

    fn record(&mut self, interaction: Interaction) {
        let mut requests = match self.metadata.remove(REQUESTS_KEY) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        requests.push(interaction.to_metadata());
        self.metadata.set(REQUESTS_KEY, Value::Array(requests));
        debug!("recorded interaction");
    }

    /// Status of the most recent response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.client.last_response().map(Response::status)
    }

    /// Body of the most recent response as text, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<String> {
        self.client
            .last_response()
            .map(|response| String::from_utf8_lossy(response.body()).into_owned())
    }

    /// Run `f` with interaction recording suspended.
    ///
    /// Interactions executed inside the block are discarded, and the
    /// `"requests"` metadata entry present before the block is restored on
    /// every exit path, panics included.
    pub fn no_doc<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.metadata.remove(REQUESTS_KEY);
        self.metadata.set(REQUESTS_KEY, Value::Array(Vec::new()));

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(self)));

        match saved {
            Some(value) => self.metadata.set(REQUESTS_KEY, value),
            None => {
                self.metadata.remove(REQUESTS_KEY);
            }
        }

        match outcome {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    /// Register the action expected to cause an inbound callback.
    pub fn trigger_callback(&mut self, action: impl FnMut(&mut TestDestination) + 'static) {
        self.callback
            .get_or_insert_with(CallbackCoordinator::new)
            .trigger_callback(action);
    }

    /// Run the registered trigger and assert the destination was called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCallbackUrl`] when no `callback_url` is
    /// bound, and a callback error when no trigger is registered or the
    /// destination never received the expected request.
    pub fn do_callback(&mut self) -> Result<()> {
        match self.callback.as_mut() {
            Some(coordinator) => coordinator.do_callback(&self.env),
            None => Err(Error::callback(
                "no trigger registered; call trigger_callback first",
            )),
        }
    }

    /// The callback destination for this test, created on first use.
    pub fn destination_mut(&mut self) -> &mut TestDestination {
        self.callback
            .get_or_insert_with(CallbackCoordinator::new)
            .destination_mut()
    }

    /// The test's metadata.
    #[must_use]
    pub const fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Mutable access to the test's metadata.
    pub const fn metadata_mut(&mut self) -> &mut M {
        &mut self.metadata
    }

    /// The client collaborator.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Mutable access to the client collaborator.
    pub const fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Finish the run, yielding the metadata for the documentation pass.
    #[must_use]
    pub fn into_metadata(self) -> M {
        self.metadata
    }
}
