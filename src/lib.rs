//! # Rust Logger Context
//!
//! Structured-logging context builder with copy-on-write logger handles.
//!
//! ## Features
//!
//! - **Immutable Handles**: every setter returns a new `Logger`, the receiver never changes
//! - **Shared Configuration**: a tree of loggers shares one `Core` until an option replaces it
//! - **Branch-Local Fields**: field storage is copied only when a shared branch grows
//! - **Silent Poisoning**: a disabled logger turns every later call into a no-op
//!
//! ```
//! use rust_logger_context::prelude::*;
//! use rust_logger_context::fields;
//!
//! let memory = MemoryAppender::new();
//! let server = Logger::builder()
//!     .appender(memory.clone())
//!     .build()
//!     .package("main")
//!     .class("Server");
//!
//! let start = server.method("Start").with(fields!["port", 8080]);
//! start.info("listening");
//!
//! assert_eq!(memory.entries()[0].func_identifier().as_deref(), Some("Server.Start"));
//! assert!(server.entry().unwrap().fields().is_empty());
//! ```

pub mod appenders;
pub mod constructors;
pub mod core;
pub mod global;
pub mod macros;

pub use crate::core::options;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::appenders::MemoryAppender;
    pub use crate::core::{
        Appender, CallSite, Caller, CallerInspector, Core, Entry, EntryFlags, Field, FieldKind,
        FieldValue, ImplicitArg, LocationInspector, LogLevel, LogOption, Logger, LoggerBuilder,
        LoggerError, OptionTarget, Result,
    };
    pub use crate::global::{default_logger, set_default_logger};
}

#[cfg(feature = "console")]
pub use crate::appenders::ConsoleAppender;
pub use crate::appenders::MemoryAppender;
pub use crate::constructors::{class, func, method, new, package};
pub use crate::core::{
    Appender, CallSite, Caller, CallerInspector, Core, Entry, EntryFlags, Field, FieldKind,
    FieldValue, ImplicitArg, LocationInspector, LogLevel, LogOption, Logger, LoggerBuilder,
    LoggerError, OptionTarget, Result, SharedAppender, SYS_FUNC_KEY,
};
pub use crate::global::{default_logger, set_default_logger};
