//! Per-key absence policy.
//!
//! Each key the loader reads under `serverN` declares what a missing (or
//! null) value means, instead of every call site deciding for itself.

use super::error::ConfigError;
use super::types::Protocol;

/// What happens when a field is absent from the document.
#[derive(Debug, Clone, Copy)]
pub enum Absence {
    /// The protocol is not configured.
    NotConfigured,
    /// The field takes its empty default.
    Empty,
    /// The load fails.
    Error(fn(Protocol) -> ConfigError),
}

/// A key under a protocol section, with its absence policy.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Key below `serverN`; `None` is the section itself.
    pub key: Option<&'static str>,
    pub absence: Absence,
}

impl Field {
    /// `serverN`: absent means the protocol is off.
    pub const SECTION: Field = Field {
        key: None,
        absence: Absence::NotConfigured,
    };

    /// `serverN.listen`: mandatory once the section exists.
    pub const LISTEN: Field = Field {
        key: Some("listen"),
        absence: Absence::Error(missing_listen),
    };

    /// `serverN.plugins`: absent means an empty chain.
    pub const PLUGINS: Field = Field {
        key: Some("plugins"),
        absence: Absence::Empty,
    };

    /// Dotted document path of the field for `protocol`.
    pub fn path(&self, protocol: Protocol) -> String {
        match self.key {
            Some(key) => protocol.path(key),
            None => protocol.section().to_string(),
        }
    }

    /// Apply the absence policy.
    ///
    /// `Ok(None)` means the protocol is not configured; `Ok(Some(_))` carries
    /// the default to use in place of the missing value.
    pub fn when_absent<T: Default>(&self, protocol: Protocol) -> Result<Option<T>, ConfigError> {
        match self.absence {
            Absence::NotConfigured => Ok(None),
            Absence::Empty => Ok(Some(T::default())),
            Absence::Error(error) => Err(error(protocol)),
        }
    }
}

fn missing_listen(protocol: Protocol) -> ConfigError {
    ConfigError::MissingListenDirective { protocol }
}
