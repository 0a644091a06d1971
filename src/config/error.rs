//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

use super::document::AccessError;
use super::types::Protocol;

/// Errors produced while loading or validating a configuration.
///
/// Every variant is terminal: the load is aborted and no partial
/// configuration is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    // ========================================================================
    // Source (file discovery and decoding)
    // ========================================================================
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("failed to parse YAML config: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("unsupported config format for {0}")]
    UnsupportedFormat(PathBuf),

    #[error("no config file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("`{path}` must be {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    // ========================================================================
    // Listen address
    // ========================================================================
    #[error("{protocol}: missing `{}` directive", .protocol.path("listen"))]
    MissingListenDirective { protocol: Protocol },

    #[error("{protocol}: invalid `listen` address: {detail}")]
    InvalidListenSyntax { protocol: Protocol, detail: String },

    #[error("{protocol}: `listen` address {address} is not an IPv{} address", .protocol.version())]
    AddressFamilyMismatch { protocol: Protocol, address: String },

    #[error("{protocol}: invalid `listen` port `{port}`")]
    InvalidPort { protocol: Protocol, port: String },

    // ========================================================================
    // Plugins
    // ========================================================================
    #[error("{protocol}: invalid plugins section, not a list")]
    InvalidPluginsSection { protocol: Protocol },

    #[error("{protocol}: plugin #{index} is not a string map")]
    InvalidPluginEntry { protocol: Protocol, index: usize },

    #[error("{protocol}: plugin #{index} has {keys} keys, exactly one plugin per item can be specified")]
    MalformedPluginEntry {
        protocol: Protocol,
        index: usize,
        keys: usize,
    },

    #[error("{protocol}: plugin #{index} has an empty name")]
    EmptyPluginName { protocol: Protocol, index: usize },

    #[error("{protocol}: plugin #{index} (`{name}`) arguments must be a scalar or a list of scalars")]
    InvalidPluginArgs {
        protocol: Protocol,
        index: usize,
        name: String,
    },

    // ========================================================================
    // Aggregate
    // ========================================================================
    #[error("need at least one valid config for DHCPv6 or DHCPv4")]
    NoProtocolConfigured,
}

impl ConfigError {
    /// Protocol the error is attributed to, if any.
    pub fn protocol(&self) -> Option<Protocol> {
        match self {
            Self::MissingListenDirective { protocol }
            | Self::InvalidListenSyntax { protocol, .. }
            | Self::AddressFamilyMismatch { protocol, .. }
            | Self::InvalidPort { protocol, .. }
            | Self::InvalidPluginsSection { protocol }
            | Self::InvalidPluginEntry { protocol, .. }
            | Self::MalformedPluginEntry { protocol, .. }
            | Self::EmptyPluginName { protocol, .. }
            | Self::InvalidPluginArgs { protocol, .. } => Some(*protocol),
            _ => None,
        }
    }
}

impl From<AccessError> for ConfigError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::TypeMismatch {
                path,
                expected,
                found,
            } => Self::TypeMismatch {
                path,
                expected,
                found,
            },
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
