//! Process-wide default logger
//!
//! Initialised on first use and never torn down. Nothing in the derivation
//! core reads it; it only exists so application code has a logger to start
//! from without threading one through every call.

use crate::core::{LogLevel, Logger};
use parking_lot::RwLock;
use std::sync::OnceLock;

static DEFAULT_LOGGER: OnceLock<RwLock<Logger>> = OnceLock::new();

fn slot() -> &'static RwLock<Logger> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(initial_logger()))
}

#[cfg(feature = "console")]
fn initial_logger() -> Logger {
    Logger::builder()
        .min_level(LogLevel::Info)
        .appender(crate::appenders::ConsoleAppender::new())
        .build()
}

#[cfg(not(feature = "console"))]
fn initial_logger() -> Logger {
    Logger::builder().min_level(LogLevel::Info).build()
}

/// Handle to the current default logger
pub fn default_logger() -> Logger {
    slot().read().clone()
}

/// Replace the default logger, returning the previous one
pub fn set_default_logger(logger: Logger) -> Logger {
    std::mem::replace(&mut *slot().write(), logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logger_round_trip() {
        let replacement = Logger::new().package("replacement");
        let previous = set_default_logger(replacement.clone());

        assert!(default_logger().ptr_eq(&replacement));

        set_default_logger(previous.clone());
        assert!(default_logger().ptr_eq(&previous));
        assert!(previous.is_valid());
    }
}
