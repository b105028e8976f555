//! Async querier on the tokio runtime.
//!
//! Mirrors the blocking API: same exchange, same outcomes, but many queries
//! can be in flight at once, each owning its own socket and deadline.

use crate::error::{QueryError, QueryOutcome};
use crate::packet;
use crate::query::{decode_response, Target};
use log::{debug, error};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time;

/// Queries one server, suspending (not blocking) while the reply is
/// awaited. The socket is dropped before the outcome is returned, so a
/// timed-out query leaks nothing.
pub async fn query(address: &str, port: u32, timeout: Duration) -> QueryOutcome {
    if port > u16::MAX as u32 {
        return Err(QueryError::InvalidPort {
            address: address.to_string(),
            port,
        });
    }

    let ip = match address_of(address).await {
        Some(ip) => ip,
        None => {
            return Err(QueryError::UnresolvableAddress {
                address: address.to_string(),
            })
        }
    };

    debug!("Querying {}:{} ({})", address, port, ip);
    match exchange(ip, port as u16, timeout).await {
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

/// Queries all targets concurrently, one task per target, each with its own
/// independent timeout. Outcomes come back in input order no matter which
/// exchange finishes first, and one slow or dead server never delays the
/// others beyond its own timeout.
pub async fn query_many(targets: &[Target], timeout: Duration) -> Vec<QueryOutcome> {
    let handles: Vec<_> = targets
        .iter()
        .cloned()
        .map(|target| tokio::spawn(async move { query(&target.address, target.port, timeout).await }))
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (handle, target) in handles.into_iter().zip(targets) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    "Query task for {}:{} died: {}",
                    target.address, target.port, e
                );
                Err(QueryError::NoResponse {
                    address: target.address.clone(),
                    port: target.port,
                })
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}

/// Async counterpart of [`crate::resolve::address_of`], resolving through
/// the runtime's resolver so lookups do not block worker threads.
pub async fn address_of(input: &str) -> Option<Ipv4Addr> {
    if crate::resolve::is_literal_address(input) {
        return input.parse().ok();
    }

    let mut addrs = match lookup_host((input, 0u16)).await {
        Ok(addrs) => addrs,
        Err(e) => {
            debug!("Resolution of {} failed: {}", input, e);
            return None;
        }
    };
    addrs.find_map(|addr| match addr {
        SocketAddr::V4(v4) => Some(*v4.ip()),
        SocketAddr::V6(_) => None,
    })
}

async fn exchange(ip: Ipv4Addr, port: u16, timeout: Duration) -> io::Result<Vec<u8>> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.send_to(packet::QUERY_PACKET, (ip, port)).await?;

    let mut buffer = [0u8; 4096];
    let (len, _) = time::timeout(timeout, socket.recv_from(&mut buffer))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "no reply before deadline"))??;
    Ok(buffer[..len].to_vec())
}
