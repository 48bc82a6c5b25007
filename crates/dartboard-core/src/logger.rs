//! Stderr logger for the scoring tools.
//!
//! Lines look like `[  12.345s  INFO dartboard_scoring::engine] message`.
//! Install once at startup with [`init_with_level`]; the `tracing` feature
//! adds [`init_tracing`] for span timing.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct ElapsedLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for ElapsedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:9.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<ElapsedLogger> = OnceLock::new();

/// Install the logger with `level`.
///
/// Later calls are no-ops; the first level wins.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| ElapsedLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Parse a level name (`off`, `error`, ..., `trace`), falling back to `info`.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name).unwrap_or(LevelFilter::Info)
}

/// `EnvFilter` directive for `level`; `RUST_LOG` takes precedence over it.
#[cfg(feature = "tracing")]
fn default_directive(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()))
}

/// Install a `tracing` subscriber that also times closed spans.
///
/// `json` switches to one flattened JSON object per line, for piping the
/// replay tool into log collectors. Repeated calls keep the first subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = default_directive(level);
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
