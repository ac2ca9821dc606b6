//! Logging setup for binaries and tests.
//!
//! The detectors only emit through the `log` facade. `init_with_level`
//! installs a small stderr logger: records from the swing-events crates pass
//! at the requested level, everything else only at `warn`. Each line carries
//! the time since installation and the emitting detector module, e.g.
//! `[  0.012s DEBUG serve::contact] window 21..=44`.
//!
//! With the `tracing` feature, `init_tracing` installs a `tracing-subscriber`
//! formatter instead, which also reports the per-detector `detect` spans.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const CRATE_PREFIX: &str = "swing_events";

/// Level applied to records from other crates.
const FOREIGN_LEVEL: LevelFilter = LevelFilter::Warn;

/// Default `tracing` filter when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
const DEFAULT_DIRECTIVES: &str = "warn,swing_events=info,swing_events_core=info,\
swing_events_serve=info,swing_events_jump=info,swing_events_impact=info";

fn is_own_target(target: &str) -> bool {
    target.starts_with(CRATE_PREFIX)
}

/// `swing_events_serve::contact::pipeline` -> `serve::contact`.
///
/// The facade itself maps to `swing_events`; foreign targets pass through.
fn short_target(target: &str) -> &str {
    let Some(rest) = target.strip_prefix("swing_events_") else {
        return target;
    };
    let mut parts = rest.splitn(3, "::");
    let krate = parts.next().unwrap_or(rest);
    match parts.next() {
        Some(module) => &rest[..krate.len() + 2 + module.len()],
        None => krate,
    }
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    fn allows(&self, level: Level, target: &str) -> bool {
        let limit = if is_own_target(target) {
            self.level
        } else {
            self.level.min(FOREIGN_LEVEL)
        };
        level <= limit
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.allows(metadata.level(), metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to
/// `info` for the swing-events crates and `warn` elsewhere.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
