//! Listen address resolution.

use std::net::{IpAddr, SocketAddr, SocketAddrV4, SocketAddrV6};

use super::document::Document;
use super::error::ConfigError;
use super::field::Field;
use super::types::Protocol;

/// Resolve the listen address of `protocol`.
///
/// Missing keys follow their [`Field`] policy: no section means the protocol
/// is not configured, a missing or blank `listen` is
/// [`ConfigError::MissingListenDirective`].
pub fn resolve_listener<D>(doc: &D, protocol: Protocol) -> Result<Option<SocketAddr>, ConfigError>
where
    D: Document + ?Sized,
{
    if !doc.has_value(&Field::SECTION.path(protocol))
        && Field::SECTION.when_absent::<()>(protocol)?.is_none()
    {
        return Ok(None);
    }

    let addr = match doc.get_string(&Field::LISTEN.path(protocol))? {
        Some(addr) if !addr.trim().is_empty() => addr,
        _ => match Field::LISTEN.when_absent::<String>(protocol)? {
            Some(addr) => addr,
            None => return Ok(None),
        },
    };
    parse_listen(protocol, addr.trim()).map(Some)
}

/// Parse and family-check a `host:port` directive.
pub fn parse_listen(protocol: Protocol, addr: &str) -> Result<SocketAddr, ConfigError> {
    let (host, port) = split_host_port(addr).map_err(|detail| ConfigError::InvalidListenSyntax {
        protocol,
        detail,
    })?;

    if host.is_empty() {
        return Err(ConfigError::InvalidListenSyntax {
            protocol,
            detail: format!("address {}: missing host", addr),
        });
    }
    let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidListenSyntax {
        protocol,
        detail: format!("address {}: `{}` is not an IP address", addr, host),
    })?;

    if !protocol.accepts(ip) {
        return Err(ConfigError::AddressFamilyMismatch {
            protocol,
            address: host.to_string(),
        });
    }

    let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort {
        protocol,
        port: port.to_string(),
    })?;

    Ok(match (protocol, ip) {
        (Protocol::V4, IpAddr::V4(v4)) => SocketAddr::V4(SocketAddrV4::new(v4, port)),
        (Protocol::V4, IpAddr::V6(v6)) => {
            // accepts() only lets mapped addresses through here
            let v4 = v6
                .to_ipv4_mapped()
                .ok_or_else(|| ConfigError::AddressFamilyMismatch {
                    protocol,
                    address: host.to_string(),
                })?;
            SocketAddr::V4(SocketAddrV4::new(v4, port))
        }
        (Protocol::V6, IpAddr::V6(v6)) => SocketAddr::V6(SocketAddrV6::new(v6, port, 0, 0)),
        (Protocol::V6, IpAddr::V4(_)) => {
            return Err(ConfigError::AddressFamilyMismatch {
                protocol,
                address: host.to_string(),
            });
        }
    })
}

/// Split `host:port` or `[host]:port`.
///
/// Unbracketed hosts are split at the last colon, so a bare IPv6 literal
/// followed by a port (`2001:db8::1:547`) is accepted.
fn split_host_port(addr: &str) -> Result<(&str, &str), String> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| format!("address {}: missing ']' in address", addr))?;
        let port = match after.strip_prefix(':') {
            Some(port) => port,
            None if after.is_empty() => {
                return Err(format!("address {}: missing port in address", addr));
            }
            None => return Err(format!("address {}: unexpected characters after ']'", addr)),
        };
        if host.contains('[') || port.contains(['[', ']']) {
            return Err(format!("address {}: unexpected '[' or ']' in address", addr));
        }
        return Ok((host, port));
    }

    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| format!("address {}: missing port in address", addr))?;
    if addr.contains(['[', ']']) {
        return Err(format!("address {}: unexpected '[' or ']' in address", addr));
    }
    Ok((host, port))
}
