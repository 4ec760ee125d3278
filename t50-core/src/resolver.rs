//! Hostname / dotted-quad resolution to a 32-bit IPv4 address.

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

/// Resolve `host` to an IPv4 address. Dotted-quad input is parsed directly;
/// anything else goes through the system resolver via `ToSocketAddrs`, the
/// same mechanism `std::net::TcpStream::connect` uses, so this picks up
/// `/etc/hosts`, `/etc/resolv.conf`, and `nsswitch.conf` like any other tool.
pub fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, ConfigError> {
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(addr);
    }

    (host, 0u16)
        .to_socket_addrs()
        .map_err(|e| ConfigError::Resolve(host.to_string(), e))?
        .find_map(|sock_addr| match sock_addr.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| {
            ConfigError::Resolve(
                host.to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no A record"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_quad_parses_without_touching_the_resolver() {
        assert_eq!(
            resolve_ipv4("192.0.2.1").unwrap(),
            Ipv4Addr::new(192, 0, 2, 1)
        );
    }

    #[test]
    fn garbage_host_fails() {
        assert!(resolve_ipv4("not a host name???").is_err());
    }
}
