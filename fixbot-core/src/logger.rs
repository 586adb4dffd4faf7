//! Logging initialization: `YYYY-MM-DD HH:MM:SS LEVEL target message key=value` lines on stdout,
//! optionally teed to a log file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Target of the Reddit client crate; raised to `debug` by `platform_debug`.
const PLATFORM_TARGET: &str = "fixbot_reddit";

/// Local time in `YYYY-MM-DD HH:MM:SS`.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Builds the filter from `RUST_LOG` (default `info`), adding a debug directive for the
/// platform client when `platform_debug` is set.
fn build_filter(platform_debug: bool) -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if !platform_debug {
        return Ok(filter);
    }
    let directive = format!("{}=debug", PLATFORM_TARGET).parse()?;
    Ok(filter.add_directive(directive))
}

/// Initializes the global tracing subscriber.
///
/// Output goes to stdout and, when `log_file_path` is given, is appended to that file as well.
/// No ANSI codes so the log file is plain text. Load `.env` before calling so `RUST_LOG` applies.
pub fn init_tracing(log_file_path: Option<&str>, platform_debug: bool) -> anyhow::Result<()> {
    let writer = match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(io::stdout.and(Arc::new(file)))
        }
        None => BoxMakeWriter::new(io::stdout),
    };

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .event_format(event_format)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(build_filter(platform_debug)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
