//! Tracing initialization.
//!
//! Diagnostics go to stderr so the scriptable move report on stdout stays
//! clean. The default filter only shows warnings; `--debug` raises it to
//! trace level for the whole crate.

use anyhow::Result;
use chrono::Local;
use std::fmt as stdfmt;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

/// Initialize the global subscriber. Safe to call once per process.
pub fn init_tracing(debug: bool) -> Result<()> {
    let env_filter = EnvFilter::new(if debug { "trace" } else { "warn" });
    let stderr_layer = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();
    registry().with(env_filter).with(stderr_layer).init();
    Ok(())
}
