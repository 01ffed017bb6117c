//! Logger setup for the binary.
//!
//! The library only emits records through the `log` facade. The binary
//! starts a flexi_logger backend and keeps the returned handle alive for the
//! length of the run.

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};
use log::{Level, Record};

/// Start logging to stderr at the given level spec (e.g., "info", "debug")
pub fn init_logging(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(level)?
        .format(simple_format)
        .log_to_stderr()
        .start()
}

pub fn level_abbr(level: Level) -> &'static str {
    match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    }
}

// Format: "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_abbr() {
        assert_eq!(level_abbr(Level::Error), "ERR");
        assert_eq!(level_abbr(Level::Warn), "WRN");
        assert_eq!(level_abbr(Level::Debug), "DBG");
    }
}
