//! Error types for docent.

use derive_more::{Display, Error, From};

/// Main error type for docent operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A callback was triggered without a `callback_url` bound in the test
    /// environment.
    #[display("You must define callback_url")]
    #[from(skip)]
    MissingCallbackUrl,

    /// The callback flow failed after registration.
    #[display("callback error: {_0}")]
    #[from(skip)]
    Callback(#[error(not(source))] String),

    /// A test scope chain is missing a required declaration.
    #[display("no endpoint declared in scope chain")]
    #[from(skip)]
    MissingEndpoint,

    /// A parameter value cannot be encoded in the requested representation.
    #[display("unsupported value for parameter '{name}': {reason}")]
    #[from(skip)]
    UnsupportedValue {
        /// Parameter key (including any bracket path).
        name: String,
        /// Why the value cannot be encoded.
        reason: String,
    },

    /// The external HTTP client collaborator failed; surfaced verbatim.
    #[display("client error: {_0}")]
    #[from(skip)]
    Client(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "order.line_items").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Filesystem error while writing documentation output.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a client error from the external collaborator.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    /// Create a callback flow error.
    #[must_use]
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }

    /// Create an unsupported-value error for a parameter key.
    #[must_use]
    pub fn unsupported_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a callback configuration error.
    #[must_use]
    pub const fn is_callback_config(&self) -> bool {
        matches!(self, Self::MissingCallbackUrl)
    }

    /// Returns `true` if this error came from the external client.
    #[must_use]
    pub const fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }
}
