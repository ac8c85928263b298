//! Shared, write-once logger configuration

use super::{
    appender::Appender,
    caller::{CallerInspector, LocationInspector},
    entry::Entry,
    error::Result,
    log_level::LogLevel,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// An appender that may be referenced by several cores at once
pub type SharedAppender = Arc<Mutex<Box<dyn Appender>>>;

/// Destinations, level threshold and caller inspector shared by every
/// `Logger` derived from a common ancestor.
///
/// A `Core` is only ever mutated before it is published behind an `Arc`.
/// Applying a Core-level option clones the current core, changes the clone
/// and binds the new logger to it; loggers holding the old core keep seeing
/// the old settings.
#[derive(Clone)]
pub struct Core {
    appenders: Vec<SharedAppender>,
    min_level: LogLevel,
    inspector: Arc<dyn CallerInspector>,
}

impl Core {
    #[must_use]
    pub fn new() -> Self {
        Self {
            appenders: Vec::new(),
            min_level: LogLevel::Info,
            inspector: Arc::new(LocationInspector),
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.min_level)
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.len()
    }

    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .iter()
            .map(|appender| appender.lock().name().to_string())
            .collect()
    }

    pub fn inspector(&self) -> &dyn CallerInspector {
        self.inspector.as_ref()
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn add_appender<A: Appender + 'static>(&mut self, appender: A) {
        self.appenders.push(Arc::new(Mutex::new(Box::new(appender))));
    }

    pub fn add_shared_appender(&mut self, appender: SharedAppender) {
        self.appenders.push(appender);
    }

    pub fn clear_appenders(&mut self) {
        self.appenders.clear();
    }

    pub fn set_caller_inspector(&mut self, inspector: Arc<dyn CallerInspector>) {
        self.inspector = inspector;
    }

    /// Hand a finished entry to every appender.
    ///
    /// Each appender is isolated with `catch_unwind`; a failing or panicking
    /// appender is reported on stderr and the rest still receive the entry.
    pub(crate) fn dispatch(&self, entry: &Entry) {
        for (idx, appender) in self.appenders.iter().enumerate() {
            let mut appender = appender.lock();
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} failed: {}", idx, e);
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                }
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        for appender in &self.appenders {
            appender.lock().flush()?;
        }
        Ok(())
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("appenders", &self.appender_names())
            .field("min_level", &self.min_level)
            .field("inspector", &self.inspector)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::error::LoggerError;

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _entry: &Entry) -> Result<()> {
            Err(LoggerError::appender("failing", "always fails"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn append(&mut self, _entry: &Entry) -> Result<()> {
            panic!("appender exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_clone_shares_appenders_not_settings() {
        let memory = MemoryAppender::new();
        let mut original = Core::new();
        original.add_appender(memory.clone());

        let mut changed = original.clone();
        changed.set_min_level(LogLevel::Error);

        assert_eq!(original.min_level(), LogLevel::Info);
        assert_eq!(changed.min_level(), LogLevel::Error);
        assert!(Arc::ptr_eq(&original.appenders[0], &changed.appenders[0]));
    }

    #[test]
    fn test_dispatch_isolates_failing_appenders() {
        let memory = MemoryAppender::new();
        let mut core = Core::new();
        core.add_appender(FailingAppender);
        core.add_appender(PanickingAppender);
        core.add_appender(memory.clone());

        core.dispatch(&Entry::new());
        core.dispatch(&Entry::new());

        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_threshold() {
        let mut core = Core::new();
        core.set_min_level(LogLevel::Warn);
        assert!(!core.is_enabled(LogLevel::Info));
        assert!(core.is_enabled(LogLevel::Warn));
        assert!(core.is_enabled(LogLevel::Fatal));
    }

    #[test]
    fn test_debug_lists_appender_names() {
        let mut core = Core::new();
        core.add_appender(MemoryAppender::new());
        let rendered = format!("{:?}", core);
        assert!(rendered.contains("memory"));
    }
}
