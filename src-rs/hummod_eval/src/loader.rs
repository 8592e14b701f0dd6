//! Sources of compiled models for the [`Client`](crate::Client).
//!
//! A [`ModuleLoader`] is asked for a module's [`ParsedModel`] the first time
//! that module is referenced. Loaders that read from disk do so once per
//! request: the text is read, compiled, and dropped.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use hummod_ir::ParsedModel;
use hummod_parser::Config;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::LoadError;

/// Trait for obtaining the compiled model of a module by name.
pub trait ModuleLoader {
    /// Loads the model of the named module.
    ///
    /// # Errors
    ///
    /// Returns an error if the module does not exist or cannot be compiled.
    fn load_model(&self, module: &str) -> Result<ParsedModel, LoadError>;
}

/// Module sources held in memory, keyed by module name.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    sources: IndexMap<String, String>,
    config: Config,
}

impl SourceMap {
    /// Creates an empty source map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration used to compile sources.
    #[must_use]
    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    /// Adds or replaces the source of a module.
    pub fn insert(&mut self, module: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(module.into(), source.into());
    }

    /// Adds or replaces the source of a module.
    #[must_use]
    pub fn with_source(mut self, module: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(module, source);
        self
    }

    /// Returns the names of the modules with sources, in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut sources = Self::new();
        for (module, source) in iter {
            sources.insert(module, source);
        }
        sources
    }
}

impl ModuleLoader for SourceMap {
    fn load_model(&self, module: &str) -> Result<ParsedModel, LoadError> {
        let source = self.sources.get(module).ok_or_else(|| LoadError::NotFound {
            module: module.to_string(),
        })?;

        Ok(hummod_parser::compile(source, Some(self.config))?)
    }
}

/// A directory of module sources named `<Module>.<extension>`.
#[derive(Debug, Clone)]
pub struct SourceDirectory {
    root: PathBuf,
    extension: String,
    config: Config,
}

impl SourceDirectory {
    /// The default extension of module source files
    pub const DEFAULT_EXTENSION: &'static str = "DES";

    /// Creates a loader for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
            config: Config::default(),
        }
    }

    /// Sets the extension of module source files.
    #[must_use]
    pub fn with_extension(self, extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..self
        }
    }

    /// Sets the configuration used to compile sources.
    #[must_use]
    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    /// Returns the directory sources are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModuleLoader for SourceDirectory {
    fn load_model(&self, module: &str) -> Result<ParsedModel, LoadError> {
        let path = module_path(&self.root, module, &self.extension)?;
        let source = read(&path, module)?;

        debug!(module, path = %path.display(), "compiling module source");
        Ok(hummod_parser::compile(&source, Some(self.config))?)
    }
}

/// A directory of compiled model artifacts named `<Module>.json`.
#[derive(Debug, Clone)]
pub struct ArtifactDirectory {
    root: PathBuf,
}

impl ArtifactDirectory {
    /// Creates a loader for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory artifacts are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModuleLoader for ArtifactDirectory {
    fn load_model(&self, module: &str) -> Result<ParsedModel, LoadError> {
        let path = module_path(&self.root, module, "json")?;
        let json = read(&path, module)?;

        debug!(module, path = %path.display(), "reading model artifact");
        ParsedModel::from_json(&json).map_err(LoadError::Artifact)
    }
}

/// Builds the path of a module's file, rejecting names that are not a single
/// path component.
fn module_path(root: &Path, module: &str, extension: &str) -> Result<PathBuf, LoadError> {
    let is_plain_name = !module.is_empty()
        && module != "."
        && module != ".."
        && !module.contains(['/', '\\']);

    if is_plain_name {
        Ok(root.join(format!("{module}.{extension}")))
    } else {
        Err(LoadError::NotFound {
            module: module.to_string(),
        })
    }
}

fn read(path: &Path, module: &str) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                module: module.to_string(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                error,
            }
        }
    })
}
