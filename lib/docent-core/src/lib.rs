//! Core types and algorithms for docent API documentation.
//!
//! This crate provides the foundational pieces used by docent:
//! - [`Method`] - HTTP method enum with query-vs-body routing
//! - [`Request`], [`RequestBuilder`] and [`RequestBody`] - resolved request types
//! - [`Response`] - HTTP response type
//! - [`Interaction`] - a recorded request/response pair
//! - [`Error`] and [`Result`] - Error handling
//! - [`ParameterSpec`], [`ResolvedParameterSet`], [`ScopeRule`] - parameter model
//! - [`build_path`] - route template substitution
//! - [`encode_query`] - nested query-string encoding

mod error;
mod interaction;
mod method;
mod param;
mod path;
mod query;
mod request;
mod response;
mod value;

pub use error::{Error, Result};
pub use interaction::Interaction;
pub use method::Method;
pub use param::{
    ParameterSelection, ParameterSpec, ResolvedParameter, ResolvedParameterSet, ScopeRule,
};
pub use path::{build_path, path_placeholders};
pub use query::encode_query;
pub use request::{Request, RequestBuilder, RequestBody};
pub use response::Response;
pub use value::canonical_string;
