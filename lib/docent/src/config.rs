//! Documentation run configuration.

use std::path::PathBuf;

/// Output format rendered at the end of a documentation run.
///
/// Each configured format maps to one [`Writer`](crate::Writer)
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Machine-readable `index.json`.
    Json,
}

/// Configuration for a documentation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Directory generated documentation is written into.
    pub docs_dir: PathBuf,
    /// Formats to render, in order.
    pub formats: Vec<Format>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("doc/api"),
            formats: vec![Format::Json],
        }
    }
}

impl Configuration {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }
}

/// Builder for [`Configuration`].
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    docs_dir: Option<PathBuf>,
    formats: Option<Vec<Format>>,
}

impl ConfigurationBuilder {
    /// Set the output directory.
    #[must_use]
    pub fn docs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.docs_dir = Some(dir.into());
        self
    }

    /// Set the rendered formats.
    #[must_use]
    pub fn formats(mut self, formats: impl IntoIterator<Item = Format>) -> Self {
        self.formats = Some(formats.into_iter().collect());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> Configuration {
        let defaults = Configuration::default();
        Configuration {
            docs_dir: self.docs_dir.unwrap_or(defaults.docs_dir),
            formats: self.formats.unwrap_or(defaults.formats),
        }
    }
}
