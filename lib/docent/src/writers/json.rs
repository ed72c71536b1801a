//! JSON index writer.

use std::fs;

use docent_core::Result;
use tracing::info;

use super::Writer;
use crate::{Configuration, Index};

/// Writes the index as `index.json` in the docs directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl Writer for JsonWriter {
    fn write(&self, index: &Index, configuration: &Configuration) -> Result<()> {
        fs::create_dir_all(&configuration.docs_dir)?;
        let path = configuration.docs_dir.join("index.json");
        let rendered = serde_json::to_string_pretty(&index.to_value())?;
        fs::write(&path, rendered)?;
        info!(path = %path.display(), examples = index.len(), "wrote JSON index");
        Ok(())
    }
}
