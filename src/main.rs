//! dhcpd-config - validate a DHCP server configuration.
//!
//! Usage: `dhcpd-config [PATH]`. Without a path, `config.{yml,yaml,toml}` is
//! looked up in `.`, `$HOME/.coredhcp/` and `/etc/coredhcp/`.

use dhcpd_config::config::{ConfigSource, TracingObserver, load_file};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let result = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_file(&path, &TracingObserver),
        None => ConfigSource::default().load(&TracingObserver),
    };
    let config = result.map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    for (protocol, server) in config.servers() {
        info!(
            %protocol,
            listener = %server.listener,
            plugins = server.plugins.len(),
            "Server configured"
        );
        for plugin in &server.plugins {
            info!(%protocol, "  {}", plugin);
        }
    }

    Ok(())
}
