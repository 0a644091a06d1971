//! Progress reporting for configuration loads.
//!
//! The loader never logs on its own. Callers pass a [`LoadObserver`] and
//! decide what to do with each [`LoadEvent`]: [`TracingObserver`] turns
//! them into `tracing` events, [`NoopObserver`] drops them, and any
//! `Fn(&LoadEvent)` closure can be used directly.

use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, info};

use super::types::{Config, PluginConfig, Protocol};

/// A step in the configuration load.
#[derive(Debug, Clone, Copy)]
pub enum LoadEvent<'a> {
    /// A config file was selected for loading.
    SourceSelected { path: &'a Path },
    /// Validation of a decoded document started.
    Started,
    /// The protocol has no section and will not run.
    ProtocolNotConfigured { protocol: Protocol },
    /// The listen directive was resolved.
    ListenerResolved {
        protocol: Protocol,
        listener: SocketAddr,
    },
    /// A plugin entry was parsed.
    PluginFound {
        protocol: Protocol,
        index: usize,
        plugin: &'a PluginConfig,
    },
    /// The load succeeded.
    Loaded { config: &'a Config },
}

/// Receives [`LoadEvent`]s while a configuration is loaded.
pub trait LoadObserver {
    fn observe(&self, event: &LoadEvent<'_>);
}

impl<F> LoadObserver for F
where
    F: Fn(&LoadEvent<'_>),
{
    fn observe(&self, event: &LoadEvent<'_>) {
        self(event)
    }
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LoadObserver for NoopObserver {
    fn observe(&self, _event: &LoadEvent<'_>) {}
}

/// Emits events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn observe(&self, event: &LoadEvent<'_>) {
        match *event {
            LoadEvent::SourceSelected { path } => {
                info!(path = %path.display(), "Using config file");
            }
            LoadEvent::Started => info!("Loading configuration"),
            LoadEvent::ProtocolNotConfigured { protocol } => {
                info!(%protocol, section = protocol.section(), "No server section, protocol disabled");
            }
            LoadEvent::ListenerResolved { protocol, listener } => {
                debug!(%protocol, %listener, "Resolved listen address");
            }
            LoadEvent::PluginFound {
                protocol,
                index,
                plugin,
            } => {
                info!(
                    %protocol,
                    index,
                    plugin = %plugin.name,
                    args = ?plugin.args,
                    "Found plugin with {} args",
                    plugin.args.len()
                );
            }
            LoadEvent::Loaded { config } => {
                info!(
                    dhcpv6 = config.server6.is_some(),
                    dhcpv4 = config.server4.is_some(),
                    "Configuration loaded"
                );
            }
        }
    }
}
