use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::range::Ipv4Range;
use sweepr_core::{discovery, dispatch};

use crate::fakes::{FakeEngine, FakeProber, record};

fn addr(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 1, 0, last)
}

fn cfg_with_workers(max_workers: usize) -> ScanConfig {
    ScanConfig {
        max_workers,
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn discovery_returns_exactly_the_alive_subset() {
    let alive = [addr(3), addr(77), addr(200)];
    let prober = Arc::new(FakeProber::new(alive));
    let range = Ipv4Range::new(addr(0), addr(255));

    let found = discovery::discover(range, prober, &cfg_with_workers(50), None).await;

    let expected: HashSet<Ipv4Addr> = alive.into_iter().collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn discovery_result_is_independent_of_pool_size() {
    let alive = [addr(1), addr(2), addr(250)];
    let range = Ipv4Range::new(addr(0), addr(255));

    for workers in [1, 3, 50, 500] {
        let prober = Arc::new(FakeProber::new(alive));
        let found = discovery::discover(range, prober, &cfg_with_workers(workers), None).await;
        let expected: HashSet<Ipv4Addr> = alive.into_iter().collect();
        assert_eq!(found, expected, "pool size {workers}");
    }
}

#[tokio::test]
async fn discovery_is_a_subset_of_the_range_without_duplicates() {
    // The fake claims liveness for addresses outside the range too; only
    // in-range ones may surface.
    let prober = Arc::new(FakeProber::new([addr(5), Ipv4Addr::new(10, 9, 9, 9)]));
    let range = Ipv4Range::new(addr(0), addr(31));

    let found = discovery::discover(range, prober, &cfg_with_workers(8), None).await;

    assert_eq!(found.len(), 1);
    assert!(found.contains(&addr(5)));
    for host in &found {
        assert!(range.contains(*host));
    }
}

#[tokio::test]
async fn discovery_never_exceeds_the_worker_bound() {
    let prober = Arc::new(FakeProber::new(std::iter::empty()));
    let max_in_flight = Arc::clone(&prober.max_in_flight);
    let range = Ipv4Range::new(addr(0), addr(255));

    discovery::discover(range, prober, &cfg_with_workers(8), None).await;

    assert!(
        max_in_flight.load(Ordering::SeqCst) <= 8,
        "observed {} concurrent probes",
        max_in_flight.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn discovery_reports_each_found_host_once() {
    let alive = [addr(10), addr(20)];
    let prober = Arc::new(FakeProber::new(alive));
    let range = Ipv4Range::new(addr(0), addr(63));

    let seen: Arc<std::sync::Mutex<Vec<Ipv4Addr>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let callback: discovery::HostFoundCallback = Arc::new(move |found_addr, _count| {
        sink.lock().unwrap().push(found_addr);
    });

    discovery::discover(range, prober, &cfg_with_workers(16), Some(callback)).await;

    let mut notified = seen.lock().unwrap().clone();
    notified.sort_unstable();
    assert_eq!(notified, vec![addr(10), addr(20)]);
}

#[tokio::test]
async fn end_to_end_two_alive_hosts_two_reports() {
    // Range of 4 addresses, 2 alive, each with one open port.
    let range = Ipv4Range::new(addr(0), addr(3));
    let prober = Arc::new(FakeProber::new([addr(1), addr(2)]));

    let found = discovery::discover(range, prober, &cfg_with_workers(50), None).await;
    let mut hosts: Vec<Ipv4Addr> = found.into_iter().collect();
    hosts.sort_unstable();
    assert_eq!(hosts, vec![addr(1), addr(2)]);

    let engine = FakeEngine::new(HashMap::from([
        (addr(1), vec![record(22, "ssh", "")]),
        (addr(2), vec![record(80, "http", "Apache httpd 2.4")]),
    ]));

    let reports = dispatch::scan_hosts(&hosts, &engine, None).await;

    assert_eq!(reports.len(), 2);
    assert_eq!(engine.invocations.load(Ordering::SeqCst), 2);

    assert_eq!(reports[0].addr, addr(1));
    assert_eq!(reports[0].open_ports, vec![record(22, "ssh", "")]);
    assert_eq!(reports[1].addr, addr(2));
    assert_eq!(
        reports[1].open_ports,
        vec![record(80, "http", "Apache httpd 2.4")]
    );

    let reported: Vec<Ipv4Addr> = reports.iter().map(|r| r.addr).collect();
    assert!(!reported.contains(&addr(0)));
    assert!(!reported.contains(&addr(3)));
}

#[tokio::test]
async fn failed_scans_still_produce_reports() {
    // An engine that knows nothing acts like every scan failed or came
    // back clean; each host must still get its (empty) report.
    let hosts = vec![addr(1), addr(2), addr(3)];
    let engine = FakeEngine::new(HashMap::new());

    let reports = dispatch::scan_hosts(&hosts, &engine, None).await;

    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.open_ports.is_empty()));
}
