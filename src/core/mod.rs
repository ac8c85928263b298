//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod entry;
pub mod error;
pub mod field;
pub mod log_core;
pub mod log_level;
pub mod logger;
pub mod options;

pub use appender::Appender;
pub use caller::{CallSite, Caller, CallerInspector, LocationInspector};
pub use entry::{Entry, EntryFlags, SYS_FUNC_KEY};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldKind, FieldValue, ImplicitArg};
pub use log_core::{Core, SharedAppender};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use options::{LogOption, OptionTarget};
