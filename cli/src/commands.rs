pub mod sweep;

use clap::Parser;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(version)]
#[command(about = "Sweeps the local network for live hosts and scans their common ports.")]
pub struct CommandLine {
    /// Skip the startup banner.
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
