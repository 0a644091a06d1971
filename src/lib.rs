//! Configuration layer for a dual-stack DHCPv4/DHCPv6 server.
//!
//! Turns a TOML or YAML document into a validated [`Config`] with an
//! optional server instance per IP family, each with a listen address and
//! an ordered plugin chain.
//!
//! ```no_run
//! use dhcpd_config::Config;
//!
//! let config = Config::load_from("/etc/coredhcp/config.yml")?;
//! for (protocol, server) in config.servers() {
//!     println!("{protocol}: {} ({} plugins)", server.listener, server.plugins.len());
//! }
//! # Ok::<(), dhcpd_config::ConfigError>(())
//! ```

pub mod config;

pub use config::{Config, ConfigError, PluginConfig, Protocol, ServerConfig};
