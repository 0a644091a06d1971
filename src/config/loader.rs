//! Document validation: per-protocol builders and the top-level load.

use super::document::Document;
use super::error::ConfigError;
use super::field::Field;
use super::listen::resolve_listener;
use super::observer::{LoadEvent, LoadObserver};
use super::plugins::parse_plugins;
use super::types::{Config, Protocol, ServerConfig};

/// Validate a decoded document into a [`Config`].
///
/// DHCPv6 is built first, then DHCPv4. The first error aborts the load.
pub fn load<D, O>(doc: &D, observer: &O) -> Result<Config, ConfigError>
where
    D: Document + ?Sized,
    O: LoadObserver + ?Sized,
{
    observer.observe(&LoadEvent::Started);

    let server6 = build_server(doc, Protocol::V6, observer)?;
    let server4 = build_server(doc, Protocol::V4, observer)?;
    if server6.is_none() && server4.is_none() {
        return Err(ConfigError::NoProtocolConfigured);
    }

    let config = Config { server6, server4 };
    observer.observe(&LoadEvent::Loaded { config: &config });
    Ok(config)
}

/// Build the configuration of a single protocol.
///
/// Returns `Ok(None)` if the document has no section for `protocol`.
pub fn build_server<D, O>(
    doc: &D,
    protocol: Protocol,
    observer: &O,
) -> Result<Option<ServerConfig>, ConfigError>
where
    D: Document + ?Sized,
    O: LoadObserver + ?Sized,
{
    let Some(listener) = resolve_listener(doc, protocol)? else {
        observer.observe(&LoadEvent::ProtocolNotConfigured { protocol });
        return Ok(None);
    };
    observer.observe(&LoadEvent::ListenerResolved { protocol, listener });

    let entries = match doc
        .get_raw_list(&Field::PLUGINS.path(protocol))
        .map_err(|_| ConfigError::InvalidPluginsSection { protocol })?
    {
        Some(entries) => entries,
        None => Field::PLUGINS.when_absent(protocol)?.unwrap_or_default(),
    };
    let plugins = parse_plugins(protocol, entries)?;
    for (index, plugin) in plugins.iter().enumerate() {
        observer.observe(&LoadEvent::PluginFound {
            protocol,
            index,
            plugin,
        });
    }

    Ok(Some(ServerConfig { listener, plugins }))
}
