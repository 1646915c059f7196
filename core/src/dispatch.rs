//! # Scan Dispatcher
//!
//! Runs the external port-scanning engine once per discovered host and
//! parses its textual report into structured open-port records.
//!
//! Dispatch is strictly sequential: the engine is resource-intensive, and
//! concurrent invocations would contend for the network and skew its
//! timing-sensitive service detection. Every engine failure is absorbed
//! here as an empty record list plus a diagnostic, so one bad host never
//! stops the pass.

use std::net::Ipv4Addr;
use std::sync::LazyLock;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use sweepr_common::config::ScanConfig;
use sweepr_common::error::ScanError;
use sweepr_common::network::host::{HostScanReport, OpenPortRecord};

use crate::STOP_SIGNAL;

const SCAN_TOOL: &str = "nmap";

/// One `<port>/tcp open <service> [banner]` line of an engine report.
static PORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\d+)/tcp\s+open\s+(\S+)(?:\s+(.*))?$").expect("port line pattern")
});

/// Capability interface for scanning one confirmed-live host.
///
/// Infallible by contract: a scan that could not run reports no open ports
/// and leaves a diagnostic behind instead of erroring.
#[async_trait]
pub trait PortScanEngine: Send + Sync {
    async fn scan_host(&self, addr: Ipv4Addr) -> Vec<OpenPortRecord>;
}

/// Scans each host in order, one engine invocation at a time.
///
/// Every host gets a report; a failed scan shows up as an empty port list,
/// indistinguishable in the report from a clean host. A raised stop signal
/// skips the hosts not yet started.
pub async fn scan_hosts(
    hosts: &[Ipv4Addr],
    engine: &dyn PortScanEngine,
    on_report: Option<&(dyn Fn(&HostScanReport) + Sync)>,
) -> Vec<HostScanReport> {
    let mut reports: Vec<HostScanReport> = Vec::with_capacity(hosts.len());

    for &addr in hosts {
        if STOP_SIGNAL.load(Ordering::Relaxed) {
            debug!("stop signal raised, skipping remaining hosts");
            break;
        }

        let open_ports = engine.scan_host(addr).await;
        let report = HostScanReport::new(addr, open_ports);
        if let Some(callback) = on_report {
            callback(&report);
        }
        reports.push(report);
    }

    reports
}

/// Drives the external scan tool as a child process.
pub struct NmapEngine {
    tool: String,
    ports_arg: String,
    include_service_banner: bool,
    host_timeout_secs: u64,
    scan_timeout: Duration,
}

impl NmapEngine {
    pub fn new(cfg: &ScanConfig) -> Self {
        Self::with_tool(cfg, SCAN_TOOL)
    }

    /// Seam for substituting the tool binary under test.
    pub fn with_tool(cfg: &ScanConfig, tool: impl Into<String>) -> Self {
        let ports_arg = cfg
            .ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<String>>()
            .join(",");

        Self {
            tool: tool.into(),
            ports_arg,
            include_service_banner: cfg.include_service_banner,
            host_timeout_secs: cfg.host_timeout_secs,
            scan_timeout: Duration::from_secs(cfg.scan_timeout_secs),
        }
    }

    async fn run_tool(&self, addr: Ipv4Addr) -> Result<String, ScanError> {
        let mut cmd = Command::new(&self.tool);
        // Hosts are already confirmed live; -Pn keeps the tool from
        // re-probing them.
        cmd.args(["-Pn", "-p", &self.ports_arg]);
        if self.include_service_banner {
            cmd.arg("-sV");
        }
        cmd.args(["-T4", "--host-timeout"])
            .arg(format!("{}s", self.host_timeout_secs))
            .arg(addr.to_string())
            .kill_on_drop(true);

        debug!("running scan command: {cmd:?}");

        let output = match timeout(self.scan_timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScanError::ToolMissing(self.tool.clone()));
            }
            Ok(Err(e)) => return Err(ScanError::Process(e)),
            Err(_elapsed) => return Err(ScanError::Timeout(self.scan_timeout.as_secs())),
        };

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl PortScanEngine for NmapEngine {
    async fn scan_host(&self, addr: Ipv4Addr) -> Vec<OpenPortRecord> {
        match self.run_tool(addr).await {
            Ok(output) => parse_scan_output(&output),
            Err(e) => {
                warn!("scan of {addr} did not run: {e}");
                Vec::new()
            }
        }
    }
}

/// Extracts one record per matching open-port line, in output order.
///
/// Everything else in the report (headers, timing stats, warnings) is
/// ignored, and zero matches is a valid, empty result.
pub fn parse_scan_output(output: &str) -> Vec<OpenPortRecord> {
    PORT_LINE
        .captures_iter(output)
        .filter_map(|caps| {
            let port: u16 = caps[1].parse().ok()?;
            if port == 0 {
                return None;
            }

            Some(OpenPortRecord {
                port,
                service: caps[2].to_string(),
                banner: caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            })
        })
        .collect()
}
