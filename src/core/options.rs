//! Options applied to a logger through `Logger::apply`
//!
//! An option is an opaque mutator that targets either the shared [`Core`]
//! or the branch-local [`EntryFlags`]. The logger only needs the target to
//! decide what to clone; what the option does is up to the option.

use super::{
    appender::Appender,
    caller::CallerInspector,
    entry::EntryFlags,
    error::Result,
    log_core::{Core, SharedAppender},
    log_level::LogLevel,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub type CoreMutator = Arc<dyn Fn(&mut Core) -> Result<()> + Send + Sync>;
pub type EntryMutator = Arc<dyn Fn(&mut EntryFlags) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget {
    Core,
    Entry,
}

#[derive(Clone)]
pub enum LogOption {
    /// Changes destinations, threshold or inspector; applied to a fresh core
    Core(CoreMutator),
    /// Changes flags on the derived entry
    Entry(EntryMutator),
}

impl LogOption {
    pub fn core<F>(mutate: F) -> Self
    where
        F: Fn(&mut Core) -> Result<()> + Send + Sync + 'static,
    {
        LogOption::Core(Arc::new(mutate))
    }

    pub fn entry<F>(mutate: F) -> Self
    where
        F: Fn(&mut EntryFlags) + Send + Sync + 'static,
    {
        LogOption::Entry(Arc::new(mutate))
    }

    pub fn target(&self) -> OptionTarget {
        match self {
            LogOption::Core(_) => OptionTarget::Core,
            LogOption::Entry(_) => OptionTarget::Entry,
        }
    }
}

impl fmt::Debug for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogOption::{:?}", self.target())
    }
}

/// Set the minimum level entries must reach to be dispatched
pub fn min_level(level: LogLevel) -> LogOption {
    LogOption::core(move |core| {
        core.set_min_level(level);
        Ok(())
    })
}

/// Like [`min_level`], parsed from text such as `"warn"`.
///
/// An unknown level fails the option, which disables the logger it is
/// applied to.
pub fn min_level_str(level: impl Into<String>) -> LogOption {
    let level = level.into();
    LogOption::core(move |core| {
        core.set_min_level(level.parse::<LogLevel>()?);
        Ok(())
    })
}

/// Add a destination. Every core this option is applied to shares the same
/// appender instance.
pub fn appender<A: Appender + 'static>(appender: A) -> LogOption {
    let shared: SharedAppender = Arc::new(Mutex::new(Box::new(appender)));
    LogOption::core(move |core| {
        core.add_shared_appender(Arc::clone(&shared));
        Ok(())
    })
}

/// Remove every destination
pub fn no_appenders() -> LogOption {
    LogOption::core(|core| {
        core.clear_appenders();
        Ok(())
    })
}

/// Replace the collaborator used for caller auto-detection
pub fn caller_inspector<I: CallerInspector + 'static>(inspector: I) -> LogOption {
    let inspector: Arc<dyn CallerInspector> = Arc::new(inspector);
    LogOption::core(move |core| {
        core.set_caller_inspector(Arc::clone(&inspector));
        Ok(())
    })
}

/// Enable or disable caller auto-detection on the derived entry
pub fn caller_info(enabled: bool) -> LogOption {
    LogOption::entry(move |flags| flags.caller_auto_detect = enabled)
}

/// Disable the derived logger; every later operation on it is a no-op
pub fn disable() -> LogOption {
    LogOption::entry(|flags| flags.enabled = false)
}
