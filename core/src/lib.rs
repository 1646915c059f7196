pub mod discovery;
pub mod dispatch;
pub mod probe;

use std::sync::atomic::AtomicBool;

/// Top-level cancellation signal, raised by the CLI on Ctrl-C.
///
/// Raising it stops the submission of new probes and scans; in-flight work
/// finishes or times out on its own.
pub static STOP_SIGNAL: AtomicBool = AtomicBool::new(false);
