//! Documentation writers.
//!
//! A writer renders a finished [`Index`] into one output format. Formats
//! configured on [`Configuration`] each get one writer invocation at the
//! end of a documentation run.

mod json;

use docent_core::Result;

pub use self::json::JsonWriter;
use crate::{Configuration, Format, Index};

/// Renders a finished index into one output format.
pub trait Writer {
    /// Write the index into the configured docs directory.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering or filesystem access fails.
    fn write(&self, index: &Index, configuration: &Configuration) -> Result<()>;
}

/// The writer implementing a configured format.
#[must_use]
pub fn writer_for(format: Format) -> Box<dyn Writer> {
    match format {
        Format::Json => Box::new(JsonWriter),
    }
}
