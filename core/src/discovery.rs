//! # Discovery Scheduler
//!
//! Fans liveness probes out across an address range with a bounded worker
//! pool and collects the alive subset. Probes for the whole range are
//! submitted up front; a semaphore keeps at most `max_workers` of them
//! in flight at once. The call fully drains before returning, so the scan
//! phase never starts while probes are still outstanding.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::range::Ipv4Range;

use crate::STOP_SIGNAL;
use crate::probe::EchoProber;

/// Invoked per live host as results complete, with the host's address and
/// the running count. Progress feedback only.
pub type HostFoundCallback = Arc<dyn Fn(Ipv4Addr, usize) + Send + Sync>;

/// Probes every address in `range` and returns the subset found alive.
///
/// The returned set is deduplicated and its iteration order carries no
/// meaning; callers that want stable output must sort it themselves.
pub async fn discover(
    range: Ipv4Range,
    prober: Arc<dyn EchoProber>,
    cfg: &ScanConfig,
    on_host_found: Option<HostFoundCallback>,
) -> HashSet<Ipv4Addr> {
    debug!(
        "probing {} addresses, {} workers",
        range.len(),
        cfg.max_workers
    );

    let limiter = Arc::new(Semaphore::new(cfg.max_workers));
    let mut probes: JoinSet<Option<Ipv4Addr>> = JoinSet::new();

    for addr in range.iter() {
        if STOP_SIGNAL.load(Ordering::Relaxed) {
            debug!("stop signal raised, halting probe submission");
            break;
        }

        let limiter = Arc::clone(&limiter);
        let prober = Arc::clone(&prober);

        probes.spawn(async move {
            // The semaphore is never closed, so acquisition only fails if
            // the whole scheduler is being torn down.
            let Ok(_permit) = limiter.acquire_owned().await else {
                return None;
            };
            prober.is_alive(addr).await.then_some(addr)
        });
    }

    // Single collector: workers never touch the set, so racing insertions
    // cannot lose updates.
    let mut alive: HashSet<Ipv4Addr> = HashSet::new();
    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok(Some(addr)) => {
                debug!("{addr} is alive");
                if alive.insert(addr) {
                    if let Some(callback) = &on_host_found {
                        callback(addr, alive.len());
                    }
                }
            }
            Ok(None) => {}
            Err(e) => debug!("probe task aborted: {e}"),
        }
    }

    alive
}
