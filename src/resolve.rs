//! Input address classification and hostname resolution.

use log::debug;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

/// True iff `input` is a literal dotted-quad IPv4 address.
///
/// Uses the standard library parser, which requires exactly four octet
/// groups in 0-255. Anything else is treated as a hostname.
pub fn is_literal_address(input: &str) -> bool {
    input.parse::<Ipv4Addr>().is_ok()
}

/// Resolves a hostname to an IPv4 address, `None` on any failure.
pub fn resolve(host: &str) -> Option<Ipv4Addr> {
    let mut addrs = match (host, 0u16).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            debug!("Resolution of {} failed: {}", host, e);
            return None;
        }
    };
    addrs.find_map(|addr| match addr {
        SocketAddr::V4(v4) => Some(*v4.ip()),
        SocketAddr::V6(_) => None,
    })
}

/// Literal addresses pass through untouched, everything else goes through
/// hostname resolution.
pub fn address_of(input: &str) -> Option<Ipv4Addr> {
    if is_literal_address(input) {
        input.parse().ok()
    } else {
        resolve(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_addresses() {
        let literals = vec!["127.0.0.1", "0.0.0.0", "255.255.255.255", "192.168.1.1"];
        for addr in literals {
            assert!(is_literal_address(addr), "should accept {}", addr);
        }
    }

    #[test]
    fn test_non_literal_inputs() {
        let hostnames = vec![
            "localhost",
            "q3.example.com",
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.",
            ".1.2.3.4",
            "",
            "10.0.0.1:27960",
        ];
        for input in hostnames {
            assert!(!is_literal_address(input), "should reject {:?}", input);
        }
    }

    #[test]
    fn test_address_of_literal_passthrough() {
        assert_eq!(
            address_of("10.20.30.40"),
            Some(Ipv4Addr::new(10, 20, 30, 40))
        );
    }

    #[test]
    fn test_resolve_localhost() {
        assert_eq!(resolve("localhost"), Some(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_resolve_failure_is_none() {
        assert_eq!(resolve("host.invalid"), None);
        assert_eq!(address_of("host.invalid"), None);
    }
}
