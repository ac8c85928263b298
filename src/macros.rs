//! Logging macros.
//!
//! `fields!` builds the flat, mixed-type sequence `Logger::with` expects.
//! The level macros format their message like `format!` and record the
//! module path of the call site, which caller auto-detection uses as the
//! package name.
//!
//! # Examples
//!
//! ```
//! use rust_logger_context::prelude::*;
//! use rust_logger_context::{fields, info};
//!
//! let logger = Logger::new().with(fields!["user", "alice", 42]);
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Build a `Vec<ImplicitArg>` from values of different types.
///
/// # Examples
///
/// ```
/// use rust_logger_context::{fields, Field, ImplicitArg};
///
/// let args: Vec<ImplicitArg> = fields!["user", "alice", 42, Field::new("ok", true), ("retry", 3)];
/// assert_eq!(args.len(), 5);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::ImplicitArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::ImplicitArg::from($arg)),+]
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_context::prelude::*;
/// # let logger = Logger::new();
/// use rust_logger_context::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            ::std::format!($($arg)+),
            $crate::CallSite::new(file!(), line!(), ::std::option::Option::Some(module_path!())),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
