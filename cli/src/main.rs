mod commands;
mod terminal;

use std::sync::atomic::Ordering;

use commands::{CommandLine, sweep};
use sweepr_common::config::ScanConfig;
use terminal::{logging, print};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner(commands.no_banner);

    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, letting in-flight work finish");
            sweepr_core::STOP_SIGNAL.store(true, Ordering::Relaxed);
        }
    });

    // Range derivation failing is the only fatal outcome; everything else
    // degrades per host and still exits zero.
    let cfg = ScanConfig::default();
    sweep::run(&cfg).await
}
