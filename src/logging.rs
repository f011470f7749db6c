#![cfg(feature = "std")]

use std::env;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Metadata, Record};

/// Stderr logger prefixing each record with seconds since the first log
/// line and its target module. Stdout stays reserved for wire traffic.
struct StderrLogger {
    started: OnceLock<Instant>,
}

impl StderrLogger {
    fn elapsed(&self) -> f64 {
        self.started.get_or_init(Instant::now).elapsed().as_secs_f64()
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{:>8.3} {:<5} [{}] {}",
                self.elapsed(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger {
    started: OnceLock::new(),
};

/// Install the logger with a level taken from the `TETROSHIP_LOG`
/// environment variable. Defaults to `info` if the variable is not set or
/// invalid.
pub fn init_logging() {
    init_logging_at(
        env::var("TETROSHIP_LOG")
            .ok()
            .and_then(|lvl| lvl.parse().ok())
            .unwrap_or(LevelFilter::Info),
    );
}

/// Install the logger at an explicit level, ignoring the environment.
/// Installing twice is a no-op; the first level wins.
pub fn init_logging_at(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
