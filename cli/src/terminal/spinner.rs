use std::net::Ipv4Addr;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub fn start_discovery_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap()
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(TICK_INTERVAL);
    pb.set_message("Probing for live hosts...");
    pb
}

pub fn report_discovery_progress(pb: &ProgressBar, addr: Ipv4Addr, count: usize) {
    pb.set_message(format!(
        "{} is alive, {} hosts identified so far...",
        addr.to_string().yellow().bold(),
        count.to_string().green().bold()
    ));
}
