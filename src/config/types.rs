//! Validated configuration types.

use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// IP family a server instance is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    V4,
    V6,
}

impl Protocol {
    /// Protocols in the order the loader processes them.
    pub const ALL: [Protocol; 2] = [Protocol::V6, Protocol::V4];

    /// Protocol version number (4 or 6).
    pub fn version(self) -> u8 {
        match self {
            Self::V4 => 4,
            Self::V6 => 6,
        }
    }

    /// Top-level document section holding this protocol's settings.
    pub fn section(self) -> &'static str {
        match self {
            Self::V4 => "server4",
            Self::V6 => "server6",
        }
    }

    /// Dotted path of a key inside this protocol's section.
    pub fn path(self, key: &str) -> String {
        format!("{}.{}", self.section(), key)
    }

    /// Returns `true` if `ip` belongs to this family.
    ///
    /// An IPv4-mapped IPv6 literal (`::ffff:a.b.c.d`) is representable as
    /// IPv4 and therefore counts as IPv4.
    pub fn accepts(self, ip: IpAddr) -> bool {
        let is_v4 = match ip {
            IpAddr::V4(_) => true,
            IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some(),
        };
        match self {
            Self::V4 => is_v4,
            Self::V6 => !is_v4,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dhcpv{}", self.version())
    }
}

/// Fully validated configuration for both server instances.
///
/// At least one of `server6` / `server4` is present after a successful load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// DHCPv6 server configuration.
    pub server6: Option<ServerConfig>,
    /// DHCPv4 server configuration.
    pub server4: Option<ServerConfig>,
}

impl Config {
    /// Configuration for one protocol, if it was configured.
    pub fn server(&self, protocol: Protocol) -> Option<&ServerConfig> {
        match protocol {
            Protocol::V4 => self.server4.as_ref(),
            Protocol::V6 => self.server6.as_ref(),
        }
    }

    /// Configured servers, v6 first.
    pub fn servers(&self) -> impl Iterator<Item = (Protocol, &ServerConfig)> {
        Protocol::ALL
            .into_iter()
            .filter_map(|p| self.server(p).map(|sc| (p, sc)))
    }
}

/// Configuration of a single-family server instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Address to bind to. Always matches the owning protocol's family.
    pub listener: SocketAddr,
    /// Plugins in activation order.
    pub plugins: Vec<PluginConfig>,
}

/// One plugin activation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginConfig {
    pub name: String,
    pub args: Vec<String>,
}

impl fmt::Display for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn server(addr: &str) -> ServerConfig {
        ServerConfig {
            listener: addr.parse().unwrap(),
            plugins: Vec::new(),
        }
    }

    #[test]
    fn protocol_paths() {
        assert_eq!(Protocol::V4.section(), "server4");
        assert_eq!(Protocol::V6.section(), "server6");
        assert_eq!(Protocol::V6.path("listen"), "server6.listen");
        assert_eq!(Protocol::V4.path("plugins"), "server4.plugins");
    }

    #[test]
    fn protocol_display() {
        assert_eq!(Protocol::V4.to_string(), "dhcpv4");
        assert_eq!(Protocol::V6.to_string(), "dhcpv6");
    }

    #[test]
    fn v4_accepts_plain_and_mapped_addresses() {
        assert!(Protocol::V4.accepts(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
        let mapped: Ipv6Addr = "::ffff:10.0.0.1".parse().unwrap();
        assert!(Protocol::V4.accepts(IpAddr::V6(mapped)));
        assert!(!Protocol::V4.accepts(IpAddr::V6(Ipv6Addr::LOCALHOST)));
    }

    #[test]
    fn v6_rejects_ipv4_representable_addresses() {
        assert!(Protocol::V6.accepts(IpAddr::V6(Ipv6Addr::UNSPECIFIED)));
        assert!(!Protocol::V6.accepts(IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
        let mapped: Ipv6Addr = "::ffff:192.0.2.1".parse().unwrap();
        assert!(!Protocol::V6.accepts(IpAddr::V6(mapped)));
    }

    #[test]
    fn servers_iterates_v6_first() {
        let config = Config {
            server6: Some(server("[::]:547")),
            server4: Some(server("0.0.0.0:67")),
        };
        let order: Vec<Protocol> = config.servers().map(|(p, _)| p).collect();
        assert_eq!(order, vec![Protocol::V6, Protocol::V4]);
    }

    #[test]
    fn servers_skips_missing_protocol() {
        let config = Config {
            server6: None,
            server4: Some(server("0.0.0.0:67")),
        };
        assert!(config.server(Protocol::V6).is_none());
        assert_eq!(config.servers().count(), 1);
    }

    #[test]
    fn plugin_display_joins_args() {
        let plugin = PluginConfig {
            name: "range".to_string(),
            args: vec!["leases.txt".to_string(), "10.0.0.10".to_string()],
        };
        assert_eq!(plugin.to_string(), "range leases.txt 10.0.0.10");

        let bare = PluginConfig {
            name: "nbp".to_string(),
            args: Vec::new(),
        };
        assert_eq!(bare.to_string(), "nbp");
    }

    #[test]
    fn config_serializes_listener_as_string() {
        let config = Config {
            server6: None,
            server4: Some(server("10.0.0.1:67")),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["server4"]["listener"], "10.0.0.1:67");
        assert!(json["server6"].is_null());
    }
}
