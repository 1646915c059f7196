//! # Host Scan Model
//!
//! What the scan phase learns about a single live host.

use std::net::Ipv4Addr;

/// One open port found on one host, parsed from the scan engine's report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenPortRecord {
    /// Always in 1..=65535.
    pub port: u16,
    pub service: String,
    /// Trailing version/banner text; empty when the engine printed none.
    pub banner: String,
}

/// Result of one scan-engine invocation against one host.
///
/// `open_ports` keeps the order the ports appeared in the engine's output.
/// A scan that failed to run yields an empty list, never an absent report.
#[derive(Clone, Debug)]
pub struct HostScanReport {
    pub addr: Ipv4Addr,
    pub open_ports: Vec<OpenPortRecord>,
}

impl HostScanReport {
    pub fn new(addr: Ipv4Addr, open_ports: Vec<OpenPortRecord>) -> Self {
        Self { addr, open_ports }
    }
}
