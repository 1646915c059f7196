use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::debug;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::host::HostScanReport;
use sweepr_common::network::interface;
use sweepr_common::network::range::Ipv4Range;
use sweepr_core::discovery::{self, HostFoundCallback};
use sweepr_core::dispatch::{self, NmapEngine};
use sweepr_core::probe::SystemPinger;

use crate::terminal::{colors, print, spinner};

/// Runs one full pass: derive range, discover, scan, report.
pub async fn run(cfg: &ScanConfig) -> anyhow::Result<()> {
    print::header("deriving scan range");
    let local = interface::local_ipv4().context("range derivation failed")?;
    let range = Ipv4Range::around(local);

    print::aligned_line("Local IP", local.to_string().color(colors::IPV4_ADDR));
    print::aligned_line(
        "Range",
        format!("{} to {}", range.start_addr, range.end_addr),
    );
    print::aligned_line("Addresses", range.len().to_string());

    let start_time: Instant = Instant::now();
    let found = run_discovery(range, cfg).await;

    if found.is_empty() {
        print::header("zero hosts detected");
        print::no_results();
        print::end_of_program();
        return Ok(());
    }

    // The discovery set's iteration order is unspecified; sort for output.
    let mut hosts: Vec<Ipv4Addr> = found.into_iter().collect();
    hosts.sort_unstable();

    print::header("live hosts");
    for addr in &hosts {
        print::print_status(addr.to_string().color(colors::IPV4_ADDR).to_string());
    }

    print::header("scanning common ports");
    debug!("dispatching sequential scans to {} hosts", hosts.len());
    let reports = run_scans(&hosts, cfg).await;

    print_summary(&reports, start_time.elapsed());
    Ok(())
}

async fn run_discovery(range: Ipv4Range, cfg: &ScanConfig) -> HashSet<Ipv4Addr> {
    let pb = spinner::start_discovery_spinner();

    let progress = pb.clone();
    let on_host_found: HostFoundCallback = Arc::new(move |addr, count| {
        spinner::report_discovery_progress(&progress, addr, count);
    });

    let prober = Arc::new(SystemPinger::new(cfg));
    let found = discovery::discover(range, prober, cfg, Some(on_host_found)).await;

    pb.finish_and_clear();
    found
}

async fn run_scans(hosts: &[Ipv4Addr], cfg: &ScanConfig) -> Vec<HostScanReport> {
    let engine = NmapEngine::new(cfg);

    // Reports print as each host's scan completes, not at the very end; a
    // full pass can take minutes per host.
    let counter = AtomicUsize::new(0);
    let on_report = move |report: &HostScanReport| {
        let idx = counter.fetch_add(1, Ordering::Relaxed);
        print::host_report(idx, report);
    };

    dispatch::scan_hosts(hosts, &engine, Some(&on_report)).await
}

fn print_summary(reports: &[HostScanReport], total_time: Duration) {
    let total_ports: usize = reports.iter().map(|report| report.open_ports.len()).sum();

    let hosts: ColoredString = format!("{} host(s)", reports.len()).bold().green();
    let ports: ColoredString = format!("{total_ports} open port(s)").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Sweep complete: {hosts}, {ports} in {elapsed}");

    print::fat_separator();
    print::centerln(&output);
    print::end_of_program();
}
