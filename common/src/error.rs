//! Error taxonomy for the sweep engine.
//!
//! Only [`RangeError::NetworkUnavailable`] ever escalates to the process
//! boundary. Probe failures collapse to "not alive" inside the prober, and
//! [`ScanError`] is absorbed by the dispatcher as an empty result plus a
//! diagnostic, so a bad host never stops the run.

use thiserror::Error;

/// Failure to derive a scan range. Fatal for the whole run.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("no usable network route to derive a scan range")]
    NetworkUnavailable(#[from] std::io::Error),
}

/// Per-host failures of the external scan engine.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan tool '{0}' not found in PATH")]
    ToolMissing(String),
    #[error("scan process failed to run")]
    Process(#[source] std::io::Error),
    #[error("scan exceeded the {0}s hard timeout")]
    Timeout(u64),
}
