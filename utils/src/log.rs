use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::env;

pub const DEFAULT_LOGGER_ENV: &str = "RUST_LOG";

/// Console (stdout) log line pattern, with explicit UTC time zone denoted by the suffix Z
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)}Z [{h({({l}):5.5})}] {m}{n}";

const CONSOLE_APPENDER: &str = "stdout";

/// Initializes a console logger. `filters` holds the caller's default level,
/// overridable at run time through the `RUST_LOG` environment variable.
pub fn init_logger(filters: &str) {
    let level = parse_level(&env::var(DEFAULT_LOGGER_ENV).unwrap_or_default())
        .or_else(|| parse_level(filters))
        .unwrap_or(LevelFilter::Info);

    let console = ConsoleAppender::builder().encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN_COLORED))).build();
    let config = Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)))
        .build(Root::builder().appender(CONSOLE_APPENDER).build(level))
        .unwrap();
    log4rs::init_config(config).unwrap();
}

fn parse_level(expression: &str) -> Option<LevelFilter> {
    let expression = expression.trim();
    if expression.is_empty() {
        return None;
    }
    match expression.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            println!("Ignoring invalid logging level '{}'", expression);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("loud"), None);
    }
}
