use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "product-explorer.log";

/// What: Pick the filter directive when `RUST_LOG` is not set.
///
/// Output:
/// - The configured level, or `info` when the setting is empty.
pub fn default_directive(configured: &str) -> String {
    let lvl = configured.trim();
    if lvl.is_empty() {
        "info".to_string()
    } else {
        lvl.to_ascii_lowercase()
    }
}

/// What: Install the global tracing subscriber writing to the log file.
///
/// Inputs:
/// - `configured_level`: `log_level` from settings (may be empty).
///
/// Details:
/// - The terminal belongs to the TUI, so output goes to `<config>/logs/product-explorer.log`.
/// - `RUST_LOG` wins over the configured level.
/// - Failure to open the file leaves logging disabled rather than aborting startup.
pub fn init_logging(configured_level: &str) {
    let path = crate::config::logs_dir().join(LOG_FILE_NAME);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {e}", path.display());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(configured_level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
}
