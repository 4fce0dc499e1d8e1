// ── Logging ───────────────────────────────────────────────────────────────────
//
// Structured logs go to stderr.  Release builds run under the GUI subsystem
// and have no console, so in practice only debug builds show anything.

use tracing::Level;

/// Install the global `tracing` subscriber.
///
/// Debug builds log at DEBUG, release builds at INFO.  Calling this twice is
/// harmless; the second install is ignored.
pub(crate) fn init() {
    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
