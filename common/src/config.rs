//! # Engine Configuration
//!
//! All tunables for one discovery-then-scan pass. There is no config file
//! and no ambient module state: the scheduler and the dispatcher receive an
//! explicit [`ScanConfig`] at construction.

/// TCP ports commonly exposed on LAN devices, probed on every live host.
pub const COMMON_PORTS: [u16; 17] = [
    21, 22, 23, 25, 53, 80, 110, 139, 143, 443, 445, 554, 8000, 8080, 8888, 3306, 3389,
];

#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Upper bound on concurrently in-flight liveness probes.
    pub max_workers: usize,
    /// Timeout handed to the system echo utility, in milliseconds.
    pub echo_timeout_ms: u64,
    /// Port for the best-effort TCP confirmation after a successful echo.
    pub fallback_port: u16,
    /// Ports passed to the external scan engine.
    pub ports: Vec<u16>,
    /// Enables service/version detection on the scan engine.
    pub include_service_banner: bool,
    /// Per-host budget handed to the scan engine itself.
    pub host_timeout_secs: u64,
    /// Hard ceiling on a single scan-engine invocation.
    pub scan_timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_workers: 50,
            echo_timeout_ms: 1_000,
            fallback_port: 80,
            ports: COMMON_PORTS.to_vec(),
            include_service_banner: true,
            host_timeout_secs: 180,
            scan_timeout_secs: 300,
        }
    }
}
