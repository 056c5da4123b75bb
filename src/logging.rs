//! Opt-in diagnostics. Set `ARIA_LOG` to a filter expression (e.g. `debug` or
//! `aria=trace`) to write a log file; stdout/stderr stay clean for the TUI
//! and the progress line.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "aria.log";

pub fn init() {
    let Ok(directives) = std::env::var("ARIA_LOG") else {
        return;
    };
    if directives.trim().is_empty() {
        return;
    }

    let Ok(file) = File::create(LOG_FILE) else {
        return;
    };
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
