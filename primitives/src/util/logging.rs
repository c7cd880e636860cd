use slog::{o, Drain, Level, LevelFilter, Logger};
use slog_async::Async;
use slog_term::{FullFormat, TermDecorator};

/// Terminal logger for the binaries, writing to `stderr` so `stdout` is left for the program output.
///
/// Every record carries the `app` key with the given `prefix`.
pub fn new_logger_with_level(prefix: &str, level: Level) -> Logger {
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!("app" => prefix.to_string()))
}

/// Parses the level names accepted by the `LOG_LEVEL` environment variable.
///
/// Unknown names fall back to [`Level::Info`].
pub fn level_from_str(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "critical" | "crit" => Level::Critical,
        "error" => Level::Error,
        "warning" | "warn" => Level::Warning,
        "debug" => Level::Debug,
        "trace" => Level::Trace,
        _ => Level::Info,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_levels() {
        assert_eq!(Level::Debug, level_from_str("DEBUG"));
        assert_eq!(Level::Warning, level_from_str("warn"));
        assert_eq!(Level::Info, level_from_str("verbose"));
    }

    #[test]
    fn terminal_logger_accepts_records() {
        let logger = new_logger_with_level("dashboard", level_from_str("warn"));

        slog::debug!(&logger, "filtered out"; "view" => "requests");
        slog::warn!(&logger, "No backend token set"; "variable" => "DASHBOARD_TOKEN");
    }
}
