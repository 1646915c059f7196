//! Local address detection.
//!
//! Connects a UDP socket toward a well-known external address so the OS
//! picks the outbound interface, then reads the chosen source address. No
//! payload is ever sent.

use std::io;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use tracing::debug;

use crate::error::RangeError;

const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// Returns the IPv4 address the OS would source outbound traffic from.
///
/// Fails with [`RangeError::NetworkUnavailable`] when no outbound route
/// exists, e.g. on a machine without a default gateway.
pub fn local_ipv4() -> Result<Ipv4Addr, RangeError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(ROUTE_PROBE_ADDR)?;

    match socket.local_addr()?.ip() {
        IpAddr::V4(addr) => {
            debug!("outbound traffic sources from {addr}");
            Ok(addr)
        }
        IpAddr::V6(addr) => Err(RangeError::NetworkUnavailable(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("expected an IPv4 source address, got {addr}"),
        ))),
    }
}
