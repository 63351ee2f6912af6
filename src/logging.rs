//! File logging. The terminal belongs to the UI, so nothing goes to stdout.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_PREFIX: &str = "pokedex.log";
const LOG_RETENTION_DAYS: u64 = 7;

/// Delete `pokedex.log*` files in `dir` older than `max_age_days`.
fn cleanup_old_logs(dir: &Path, max_age_days: u64) {
    let cutoff = SystemTime::now() - Duration::from_secs(max_age_days * 86400);
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with(LOG_PREFIX) {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(|t| t < cutoff)
            .unwrap_or(false);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Install the global subscriber.
///
/// Filter comes from `POKEDEX_LOG`, then `RUST_LOG`, defaulting to `info`.
/// Output rolls daily inside `dir`.
pub fn init(dir: &Path) {
    let filter = EnvFilter::try_from_env("POKEDEX_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("warning: failed to create log directory {:?}: {}", dir, e);
    }
    cleanup_old_logs(dir, LOG_RETENTION_DAYS);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(dir, LOG_PREFIX))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
