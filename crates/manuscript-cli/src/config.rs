//! Configuration loading for the book tool.
//!
//! `defaults/book.default.toml` is embedded into the binary so the documented
//! defaults and runtime behavior stay in sync. A `book.toml` in the working
//! directory, then any `--config` file, are layered on top before the result
//! is deserialized into [`BookConfig`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/book.default.toml");

/// Optional per-project configuration picked up from the working directory.
pub const PROJECT_FILE: &str = "book.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct BookConfig {
    pub render: RenderConfig,
    pub publish: PublishConfig,
}

/// Plain-text rendering knobs used by `cat`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub indent: String,
    pub title_page: bool,
}

/// Typesetter invocation used by `pub -f pdf`.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    pub groff: String,
    pub groff_args: Vec<String>,
}

/// Helper for layering configuration files over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BookConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load defaults, then `./book.toml`, then `explicit` if given.
pub fn load(explicit: Option<&Path>) -> Result<BookConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);

    if let Some(path) = explicit {
        loader = loader.with_file(path);
    }
    loader.build()
}
