//! Browser console logging. `tracing` events are forwarded as `log` records
//! (the `log` feature, active while no tracing subscriber is installed) and
//! `console_log` writes them to the devtools console.

use itinerary_shared::LogLevel;

fn console_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Trace => log::Level::Trace,
    }
}

pub fn init(level: LogLevel) {
    // A second init (hot reload) keeps the first logger.
    if console_log::init_with_level(console_level(level)).is_err() {
        log::set_max_level(console_level(level).to_level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_levels_map_onto_console_levels() {
        assert_eq!(console_level(LogLevel::default()), log::Level::Info);
        assert_eq!(console_level(LogLevel::Warn), log::Level::Warn);
        assert_eq!(console_level(LogLevel::Trace), log::Level::Trace);
        assert!(console_level(LogLevel::Error) < console_level(LogLevel::Debug));
    }
}
