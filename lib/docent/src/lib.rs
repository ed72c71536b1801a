//! Generate API documentation from declarative request tests.
//!
//! Tests declare parameters, headers, and endpoints against a tree of
//! description scopes; executing a request resolves those declarations,
//! dispatches through an HTTP client collaborator, and records the
//! interaction on the test's metadata. A reporting pass then gathers the
//! passing tests into an index and renders it through pluggable writers.
//!
//! # Example
//!
//! ```
//! use docent::{InMemoryMetadata, RecordingClient, ScopeRegistry, TestRun};
//! use docent_core::{Method, ParameterSpec};
//!
//! let mut registry = ScopeRegistry::new();
//! let resource = registry.resource("Order");
//! registry.declare_parameter(resource, ParameterSpec::new("type").description("Order type"));
//!
//! let scope = registry.child(resource);
//! registry.endpoint(scope, Method::Get, "/orders");
//!
//! let mut run = TestRun::new(
//!     &registry,
//!     scope,
//!     RecordingClient::new(),
//!     InMemoryMetadata::new(),
//! )?;
//! run.bind("type", "short");
//! run.do_request(&[])?;
//!
//! assert_eq!(run.status(), Some(200));
//! # Ok::<(), docent_core::Error>(())
//! ```

mod callback;
mod client;
mod config;
mod documentation;
mod environment;
mod example;
mod executor;
mod headers;
mod index;
mod metadata;
mod registry;
mod serializer;
pub mod writers;

pub use callback::{CallbackCoordinator, CallbackState, TestDestination};
pub use client::{HttpDispatch, RecordingClient};
pub use config::{Configuration, ConfigurationBuilder, Format};
pub use documentation::ApiDocumentation;
pub use environment::Environment;
pub use example::Example;
pub use executor::TestRun;
pub use headers::{HeaderValue, headers_to_metadata, resolve_headers};
pub use index::Index;
pub use metadata::{InMemoryMetadata, Metadata};
pub use registry::{ResolvedScope, ScopeId, ScopeRegistry};
pub use serializer::serialize_params;
pub use writers::{JsonWriter, Writer};

// Re-export core types
pub use docent_core::{
    Error, Interaction, Method, ParameterSelection, ParameterSpec, Request, RequestBody,
    RequestBuilder, ResolvedParameter, ResolvedParameterSet, Response, Result, ScopeRule,
    build_path, canonical_string, encode_query, path_placeholders,
};
