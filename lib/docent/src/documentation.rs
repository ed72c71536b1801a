//! Documentation run lifecycle.

use std::fs;

use docent_core::Result;
use tracing::{debug, info};

use crate::writers::writer_for;
use crate::{Configuration, Example, Index};

/// One documentation run: gathers passing examples into an index, then
/// renders every configured format.
#[derive(Debug, Default)]
pub struct ApiDocumentation {
    configuration: Configuration,
    index: Index,
}

impl ApiDocumentation {
    /// Create a run with the given configuration.
    #[must_use]
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            index: Index::new(),
        }
    }

    /// The run's configuration.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The index gathered so far.
    #[must_use]
    pub const fn index(&self) -> &Index {
        &self.index
    }

    /// Rebuild the docs directory, removing prior output.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be removed or recreated.
    pub fn clear_docs(&self) -> Result<()> {
        let dir = &self.configuration.docs_dir;
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "cleared docs directory");
        Ok(())
    }

    /// Add a finished example to the index, unless its metadata opts out.
    pub fn document_example(&mut self, example: Example) {
        if example.should_document() {
            debug!(description = example.description(), "indexed example");
            self.index.push(example);
        } else {
            debug!(description = example.description(), "skipped example");
        }
    }

    /// Render the index in every configured format.
    ///
    /// # Errors
    ///
    /// Returns the first writer failure.
    pub fn write(&self) -> Result<()> {
        for format in &self.configuration.formats {
            writer_for(*format).write(&self.index, &self.configuration)?;
        }
        Ok(())
    }
}
