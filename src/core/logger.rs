//! Logger handle and its copy-on-write derivation
//!
//! A `Logger` is a pair of shared pointers: one to the [`Core`] every branch
//! of a logger tree shares, one to the [`Entry`] holding this branch's
//! fields and names. No method changes the receiver. Each setter returns a
//! new `Logger`, or the receiver itself when the input is empty or the
//! logger is no longer usable:
//!
//! ```
//! use rust_logger_context::{fields, Logger};
//!
//! let root = Logger::new().package("main");
//! let request = root.with(fields!["request_id", "abc-123"]);
//!
//! assert!(root.entry().unwrap().fields().is_empty());
//! assert_eq!(request.entry().unwrap().fields().len(), 1);
//! ```

use super::{
    appender::Appender,
    caller::{CallSite, CallerInspector},
    entry::Entry,
    error::Result,
    field::{Field, ImplicitArg},
    log_core::{Core, SharedAppender},
    log_level::LogLevel,
    options::LogOption,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    core: Option<Arc<Core>>,
    entry: Option<Arc<Entry>>,
}

/// A logger under construction: shares the parent's core, owns a private
/// copy of the parent's entry.
struct Derived {
    core: Arc<Core>,
    entry: Entry,
}

impl Derived {
    fn publish(self) -> Logger {
        Logger {
            core: Some(self.core),
            entry: Some(Arc::new(self.entry)),
        }
    }
}

impl Logger {
    /// Logger bound to a fresh default core, caller auto-detection on
    #[must_use]
    pub fn new() -> Self {
        Self::from_core(Core::new())
    }

    #[must_use]
    pub fn from_core(core: Core) -> Self {
        Self::from_parts(core, Entry::new())
    }

    fn from_parts(core: Core, entry: Entry) -> Self {
        Self {
            core: Some(Arc::new(core)),
            entry: Some(Arc::new(entry)),
        }
    }

    /// A logger with neither core nor entry. Every operation on it is a
    /// no-op.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            core: None,
            entry: None,
        }
    }

    pub fn core(&self) -> Option<&Core> {
        self.core.as_deref()
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.can_continue()
    }

    /// Whether both handles point at the same core and the same entry
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        same(&self.core, &other.core) && same(&self.entry, &other.entry)
    }

    fn can_continue(&self) -> bool {
        self.core.is_some() && self.entry.as_ref().is_some_and(|e| e.flags().enabled)
    }

    /// The one place that decides what a derived logger shares.
    ///
    /// The core is always shared. The entry is cloned; its field storage
    /// stays shared until it has to grow, unless `own_fields` asks for a
    /// private copy up front.
    fn derive(&self, own_fields: bool) -> Option<Derived> {
        let core = self.core.as_ref()?;
        let mut entry = Entry::clone(self.entry.as_ref()?);
        if own_fields {
            entry.detach_fields(0);
        }
        Some(Derived {
            core: Arc::clone(core),
            entry,
        })
    }

    fn derive_with<F>(&self, fill: F) -> Logger
    where
        F: FnOnce(&mut Entry),
    {
        match self.derive(false) {
            Some(mut derived) => {
                fill(&mut derived.entry);
                derived.publish()
            }
            None => self.clone(),
        }
    }

    /// Apply options in order; later options win on conflicting settings.
    ///
    /// If an option fails, the returned logger is disabled and the error is
    /// reported on stderr. Use [`Logger::try_apply`] to get the error
    /// instead.
    #[must_use]
    pub fn apply<I>(&self, options: I) -> Logger
    where
        I: IntoIterator<Item = LogOption>,
    {
        match self.try_apply(options) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to apply options, logger disabled: {}", e);
                self.derive_with(|entry| entry.flags_mut().enabled = false)
            }
        }
    }

    /// Apply options, returning the first option error
    pub fn try_apply<I>(&self, options: I) -> Result<Logger>
    where
        I: IntoIterator<Item = LogOption>,
    {
        let options: Vec<LogOption> = options.into_iter().collect();
        if options.is_empty() || !self.can_continue() {
            return Ok(self.clone());
        }
        let Some(mut derived) = self.derive(false) else {
            return Ok(self.clone());
        };

        let mut core: Option<Core> = None;
        for option in &options {
            match option {
                LogOption::Core(mutate) => {
                    let core = core.get_or_insert_with(|| Core::clone(&derived.core));
                    mutate(core)?;
                }
                LogOption::Entry(mutate) => mutate(derived.entry.flags_mut()),
            }
        }
        if let Some(core) = core {
            derived.core = Arc::new(core);
        }

        Ok(derived.publish())
    }

    /// Set the package name. Clears function, class and method names and
    /// disables caller auto-detection.
    #[must_use]
    pub fn package(&self, name: &str) -> Logger {
        if name.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.set_package_name(name))
    }

    /// Set the function name. Clears class and method names.
    #[must_use]
    pub fn func(&self, name: &str) -> Logger {
        if name.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.set_func_name(name))
    }

    /// Set the class name. Clears function and method names.
    #[must_use]
    pub fn class(&self, name: &str) -> Logger {
        if name.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.set_class_name(name))
    }

    /// Set the method name. Clears the function name.
    ///
    /// Without a class this behaves as [`Logger::func`].
    #[must_use]
    pub fn method(&self, name: &str) -> Logger {
        if name.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.set_method_name(name))
    }

    /// Set the group. Names and caller detection are left alone.
    #[must_use]
    pub fn group(&self, name: &str) -> Logger {
        if name.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.set_group(name))
    }

    /// Add implicit fields from a flat sequence.
    ///
    /// A string followed by a value becomes a named field; any other value
    /// gets an automatic `_<index>` key. Typed [`Field`]s may be mixed in
    /// and are kept as they are. A `(key, value)` tuple whose key is not a
    /// string is dropped, the rest still apply.
    ///
    /// ```
    /// use rust_logger_context::{fields, Logger};
    ///
    /// let logger = Logger::new().with(fields!["user", "alice", 42]);
    /// let entry = logger.entry().unwrap();
    /// assert_eq!(entry.fields()[0].key, "user");
    /// assert_eq!(entry.fields()[1].key, "_1");
    /// ```
    #[must_use]
    pub fn with<I>(&self, args: I) -> Logger
    where
        I: IntoIterator,
        I::Item: Into<ImplicitArg>,
    {
        let args: Vec<ImplicitArg> = args.into_iter().map(Into::into).collect();
        if args.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.with(args, Vec::new()))
    }

    /// Add typed fields verbatim
    #[must_use]
    pub fn with_strict<I>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = Field>,
    {
        let fields: Vec<Field> = fields.into_iter().collect();
        if fields.is_empty() || !self.can_continue() {
            return self.clone();
        }
        self.derive_with(|entry| entry.with(Vec::new(), fields))
    }

    /// Whether an entry at `level` would reach the appenders
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.can_continue() && self.core.as_ref().is_some_and(|core| core.is_enabled(level))
    }

    /// Produce the fully populated entry for one message without
    /// dispatching it. The returned entry owns its field storage.
    pub fn entry_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        site: CallSite,
    ) -> Option<Entry> {
        if !self.can_continue() {
            return None;
        }
        let mut derived = self.derive(true)?;
        derived
            .entry
            .finalize(level, message.into(), derived.core.inspector(), &site);
        Some(derived.entry)
    }

    pub fn log_at(&self, level: LogLevel, message: impl Into<String>, site: CallSite) {
        if !self.is_enabled(level) {
            return;
        }
        if let (Some(core), Some(entry)) = (self.core.as_ref(), self.entry_at(level, message, site))
        {
            core.dispatch(&entry);
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_at(level, message, CallSite::caller());
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn flush(&self) -> Result<()> {
        match self.core.as_ref() {
            Some(core) => core.flush(),
            None => Ok(()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("valid", &self.can_continue())
            .field("core", &self.core)
            .field("entry", &self.entry)
            .finish()
    }
}

/// Builder for the initial logger of a tree
///
/// # Example
/// ```
/// use rust_logger_context::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(memory.clone())
///     .caller_info(false)
///     .build();
///
/// logger.debug("ready");
/// assert_eq!(memory.len(), 1);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<SharedAppender>,
    caller_info: bool,
    inspector: Option<Arc<dyn CallerInspector>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            caller_info: true,
            inspector: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(Mutex::new(Box::new(appender))));
        self
    }

    /// Enable or disable caller auto-detection on the root entry
    #[must_use = "builder methods return a new value"]
    pub fn caller_info(mut self, enabled: bool) -> Self {
        self.caller_info = enabled;
        self
    }

    /// Replace the default `Location`-based caller inspector
    #[must_use = "builder methods return a new value"]
    pub fn caller_inspector<I: CallerInspector + 'static>(mut self, inspector: I) -> Self {
        self.inspector = Some(Arc::new(inspector));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut core = Core::new();
        core.set_min_level(self.min_level);
        for appender in self.appenders {
            core.add_shared_appender(appender);
        }
        if let Some(inspector) = self.inspector {
            core.set_caller_inspector(inspector);
        }

        let mut entry = Entry::new();
        entry.flags_mut().caller_auto_detect = self.caller_info;

        Logger::from_parts(core, entry)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
