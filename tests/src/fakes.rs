//! Deterministic stand-ins for the capability interfaces, so the engine's
//! correctness is testable without OS privileges or network access.

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use sweepr_common::network::host::OpenPortRecord;
use sweepr_core::dispatch::PortScanEngine;
use sweepr_core::probe::EchoProber;

/// Answers "alive" for a fixed set of addresses and tracks how many probes
/// ran concurrently.
pub struct FakeProber {
    alive: HashSet<Ipv4Addr>,
    in_flight: AtomicUsize,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl FakeProber {
    pub fn new(alive: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl EchoProber for FakeProber {
    async fn is_alive(&self, addr: Ipv4Addr) -> bool {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Yield long enough for other workers to pile up behind the pool.
        tokio::time::sleep(Duration::from_millis(2)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.alive.contains(&addr)
    }
}

/// Returns a canned record list per address; anything unknown scans clean.
pub struct FakeEngine {
    results: HashMap<Ipv4Addr, Vec<OpenPortRecord>>,
    pub invocations: AtomicUsize,
}

impl FakeEngine {
    pub fn new(results: HashMap<Ipv4Addr, Vec<OpenPortRecord>>) -> Self {
        Self {
            results,
            invocations: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PortScanEngine for FakeEngine {
    async fn scan_host(&self, addr: Ipv4Addr) -> Vec<OpenPortRecord> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.results.get(&addr).cloned().unwrap_or_default()
    }
}

pub fn record(port: u16, service: &str, banner: &str) -> OpenPortRecord {
    OpenPortRecord {
        port,
        service: service.to_string(),
        banner: banner.to_string(),
    }
}
