use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Set up file logging when `TASKFLOW_LOG` names a log file.
///
/// Logging is disabled by default: the TUI owns the terminal, so events
/// must never reach stdout. `RUST_LOG` controls the filter as usual.
pub fn init() {
    let Ok(log_path) = std::env::var("TASKFLOW_LOG") else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("warning: failed to create log file {log_path}");
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry().with(filter).with(file_layer).init();
}
