//! Blocking querier: one socket per exchange, used then released.

use crate::error::{QueryError, QueryOutcome};
use crate::{packet, resolve, status};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, UdpSocket};
use std::time::Duration;

/// One server to query. `port` is wider than `u16` on purpose so that an
/// out-of-range port becomes an `Invalid port` outcome instead of being
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub address: String,
    pub port: u32,
}

impl Target {
    pub fn new(address: impl Into<String>, port: u32) -> Self {
        Target {
            address: address.into(),
            port,
        }
    }
}

/// Queries one server and blocks until a reply arrives or `timeout`
/// elapses. Sends exactly one datagram and awaits at most one.
pub fn query(address: &str, port: u32, timeout: Duration) -> QueryOutcome {
    if port > u16::MAX as u32 {
        return Err(QueryError::InvalidPort {
            address: address.to_string(),
            port,
        });
    }

    let ip = match resolve::address_of(address) {
        Some(ip) => ip,
        None => {
            return Err(QueryError::UnresolvableAddress {
                address: address.to_string(),
            })
        }
    };

    debug!("Querying {}:{} ({})", address, port, ip);
    match exchange(ip, port as u16, timeout) {
        Ok(reply) => decode_response(&reply, address, port),
        Err(e) => {
            debug!("No reply from {}:{}: {}", address, port, e);
            Err(QueryError::NoResponse {
                address: address.to_string(),
                port,
            })
        }
    }
}

/// Queries every target in turn, one outcome per target in input order.
/// A failed target never aborts the rest.
pub fn query_many(targets: &[Target], timeout: Duration) -> Vec<QueryOutcome> {
    targets
        .iter()
        .map(|target| query(&target.address, target.port, timeout))
        .collect()
}

fn exchange(ip: Ipv4Addr, port: u16, timeout: Duration) -> std::io::Result<Vec<u8>> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_read_timeout(Some(timeout))?;
    socket.send_to(packet::QUERY_PACKET, (ip, port))?;

    let mut buffer = [0u8; 4096];
    let (len, _) = socket.recv_from(&mut buffer)?;
    Ok(buffer[..len].to_vec())
}

/// Validates reply framing and parses the body. Shared by the blocking and
/// async queriers; parse failures fold into `MalformedResponse` rather
/// than escaping as faults.
pub(crate) fn decode_response(datagram: &[u8], address: &str, port: u32) -> QueryOutcome {
    let malformed = || QueryError::MalformedResponse {
        address: address.to_string(),
        port,
    };

    let (header, body) = match packet::split_packet(datagram) {
        Some(split) => split,
        None => {
            warn!(
                "Reply from {}:{} is shorter than the response header",
                address, port
            );
            return Err(malformed());
        }
    };

    if !packet::is_valid_header(header) || !packet::is_valid_body(body) {
        return Err(malformed());
    }

    status::parse_info(body).map_err(|e| {
        warn!("Unparseable response from {}:{}: {}", address, port, e);
        malformed()
    })
}
