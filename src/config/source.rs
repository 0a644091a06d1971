//! Config file discovery and decoding.

use std::path::{Path, PathBuf};

use super::document::{Format, TreeDocument};
use super::error::ConfigError;
use super::loader::load;
use super::observer::{LoadEvent, LoadObserver, TracingObserver};
use super::types::Config;

/// Base name of the config file, without extension.
pub const CONFIG_NAME: &str = "config";

/// Locates the config file on a list of directories.
///
/// Each directory is tried in order with every extension in
/// [`Format::EXTENSIONS`]; the first existing file wins.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    search_paths: Vec<PathBuf>,
    name: String,
}

impl Default for ConfigSource {
    /// `.`, then `$HOME/.coredhcp/`, then `/etc/coredhcp/`.
    fn default() -> Self {
        let mut search_paths = vec![PathBuf::from(".")];
        if let Some(dirs) = directories::UserDirs::new() {
            search_paths.push(dirs.home_dir().join(".coredhcp"));
        }
        search_paths.push(PathBuf::from("/etc/coredhcp"));
        Self::with_search_paths(search_paths)
    }
}

impl ConfigSource {
    /// Search the given directories instead of the default ones.
    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
            name: CONFIG_NAME.to_string(),
        }
    }

    /// Look for `<name>.<ext>` instead of `config.<ext>`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// All candidate files, in lookup order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .flat_map(|dir| {
                Format::EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{}.{}", self.name, ext)))
            })
            .collect()
    }

    /// Path of the first candidate that exists.
    pub fn discover(&self) -> Result<PathBuf, ConfigError> {
        let candidates = self.candidates();
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Ok(path.clone()),
            None => Err(ConfigError::NotFound {
                searched: candidates,
            }),
        }
    }

    /// Discover, read and validate the configuration.
    pub fn load<O>(&self, observer: &O) -> Result<Config, ConfigError>
    where
        O: LoadObserver + ?Sized,
    {
        let path = self.discover()?;
        load_file(&path, observer)
    }
}

/// Read and decode a config file, picking the format from its extension.
pub fn read_document(path: &Path) -> Result<TreeDocument, ConfigError> {
    let format = Format::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    TreeDocument::parse(&text, format)
}

/// Read, decode and validate a single config file.
pub fn load_file<O>(path: &Path, observer: &O) -> Result<Config, ConfigError>
where
    O: LoadObserver + ?Sized,
{
    observer.observe(&LoadEvent::SourceSelected { path });
    let doc = read_document(path)?;
    load(&doc, observer)
}

impl Config {
    /// Discover the config file on the default search path and load it.
    pub fn load() -> Result<Self, ConfigError> {
        ConfigSource::default().load(&TracingObserver)
    }

    /// Load a specific config file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_file(path.as_ref(), &TracingObserver)
    }

    /// Validate configuration text.
    pub fn parse(text: &str, format: Format) -> Result<Self, ConfigError> {
        let doc = TreeDocument::parse(text, format)?;
        load(&doc, &TracingObserver)
    }
}
