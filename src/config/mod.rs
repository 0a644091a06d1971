//! Configuration loading and validation.
//!
//! This module is split into logical submodules:
//! - [`types`]: Validated config types (Config, ServerConfig, PluginConfig, Protocol)
//! - [`document`]: Dotted-path access to decoded TOML/YAML documents
//! - [`field`]: What a missing key means, per key
//! - [`listen`]: `listen` directive resolution and address family checks
//! - [`plugins`]: Plugin list parsing
//! - [`loader`]: Per-protocol builders and the top-level load
//! - [`source`]: Config file discovery
//! - [`observer`]: Load progress reporting
//!
//! A document may configure DHCPv6 (`server6`), DHCPv4 (`server4`) or both;
//! a load fails only if neither is present.

mod document;
mod error;
mod field;
mod listen;
mod loader;
mod observer;
mod plugins;
mod source;
mod types;

pub use document::{AccessError, Document, Format, TreeDocument};
pub use error::ConfigError;
pub use field::{Absence, Field};
pub use listen::{parse_listen, resolve_listener};
pub use loader::{build_server, load};
pub use observer::{LoadEvent, LoadObserver, NoopObserver, TracingObserver};
pub use plugins::parse_plugins;
pub use source::{CONFIG_NAME, ConfigSource, load_file, read_document};
pub use types::{Config, PluginConfig, Protocol, ServerConfig};
