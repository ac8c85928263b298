//! Per-branch logging context
//!
//! An `Entry` holds everything one eventual log message needs: the ordered
//! field sequence, hierarchical naming, flags and, once produced for
//! emission, timestamp, level and message. Entries are published behind an
//! `Arc` inside a `Logger` and never changed afterwards; derivation clones
//! the struct and shares the field storage until it has to grow.

use super::caller::{CallSite, CallerInspector};
use super::field::{resolve_implicit, Field, FieldValue, ImplicitArg};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Key of the auto-generated field naming the function or `class.method`
pub const SYS_FUNC_KEY: &str = "sys.func";

/// Flags an Entry-level option may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFlags {
    /// Fill package/func from the call site at emission time
    pub caller_auto_detect: bool,
    /// A disabled entry turns every operation on its logger into a no-op
    pub enabled: bool,
}

impl Default for EntryFlags {
    fn default() -> Self {
        Self {
            caller_auto_detect: true,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    fields: Arc<Vec<Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    func: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip)]
    flags: EntryFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    level: LogLevel,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<String>,
}

impl Entry {
    pub(crate) fn new() -> Self {
        Self {
            fields: Arc::new(Vec::new()),
            package: None,
            func: None,
            class: None,
            method: None,
            group: None,
            flags: EntryFlags::default(),
            timestamp: None,
            level: LogLevel::default(),
            message: String::new(),
            caller: None,
        }
    }

    /// Sanitize log message to prevent log injection attacks
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Last value stored under `key`; later fields shadow earlier ones
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn func_name(&self) -> Option<&str> {
        self.func.as_deref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn flags(&self) -> EntryFlags {
        self.flags
    }

    pub fn caller_auto_detect(&self) -> bool {
        self.flags.caller_auto_detect
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `file:line` of the call site, set only when the caller was inspected
    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    /// Identifier used for the `sys.func` field: the function name, or
    /// `class.method`, or the bare class name. A logger named only by its
    /// package falls back to the package name.
    pub fn func_identifier(&self) -> Option<String> {
        match (&self.func, &self.class, &self.method) {
            (Some(func), _, _) => Some(func.clone()),
            (None, Some(class), Some(method)) => Some(format!("{}.{}", class, method)),
            (None, Some(class), None) => Some(class.clone()),
            (None, None, Some(method)) => Some(method.clone()),
            (None, None, None) => self.package.clone(),
        }
    }

    /// Whether both entries read the same field storage
    pub fn shares_fields_with(&self, other: &Entry) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    pub(crate) fn flags_mut(&mut self) -> &mut EntryFlags {
        &mut self.flags
    }

    pub(crate) fn set_package_name(&mut self, name: &str) {
        self.package = Some(name.to_string());
        self.func = None;
        self.class = None;
        self.method = None;
        self.flags.caller_auto_detect = false;
    }

    pub(crate) fn set_func_name(&mut self, name: &str) {
        self.func = Some(name.to_string());
        self.class = None;
        self.method = None;
        self.flags.caller_auto_detect = false;
    }

    pub(crate) fn set_class_name(&mut self, name: &str) {
        self.class = Some(name.to_string());
        self.func = None;
        self.method = None;
        self.flags.caller_auto_detect = false;
    }

    /// Without a class the method name takes the function-name role.
    pub(crate) fn set_method_name(&mut self, name: &str) {
        if self.class.is_none() {
            self.set_func_name(name);
            return;
        }
        self.method = Some(name.to_string());
        self.func = None;
        self.flags.caller_auto_detect = false;
    }

    pub(crate) fn set_group(&mut self, group: &str) {
        self.group = Some(group.to_string());
    }

    /// Make the field storage exclusively owned, reserving room for
    /// `additional` more fields.
    ///
    /// Storage still reachable from another entry is never grown in place:
    /// a new vector sized for old + new is allocated and filled instead.
    pub(crate) fn detach_fields(&mut self, additional: usize) -> &mut Vec<Field> {
        if Arc::get_mut(&mut self.fields).is_none() {
            let mut owned = Vec::with_capacity(self.fields.len() + additional);
            owned.extend(self.fields.iter().cloned());
            self.fields = Arc::new(owned);
        }
        let fields = Arc::make_mut(&mut self.fields);
        fields.reserve(additional);
        fields
    }

    /// Append implicit fields, then explicit ones, onto copy-on-write storage
    pub(crate) fn with(&mut self, implicit: Vec<ImplicitArg>, explicit: Vec<Field>) {
        let resolved = resolve_implicit(implicit, self.fields.len());
        if resolved.is_empty() && explicit.is_empty() {
            return;
        }
        let fields = self.detach_fields(resolved.len() + explicit.len());
        fields.extend(resolved);
        fields.extend(explicit);
    }

    /// Fill emission slots; caller inspection runs at most once.
    pub(crate) fn finalize(
        &mut self,
        level: LogLevel,
        message: String,
        inspector: &dyn CallerInspector,
        site: &CallSite,
    ) {
        self.timestamp = Some(Utc::now());
        self.level = level;
        self.message = Self::sanitize_message(&message);

        if self.flags.caller_auto_detect {
            let caller = inspector.capture(site);
            if self.package.is_none() {
                self.package = caller.package;
            }
            if self.func.is_none() && self.class.is_none() {
                self.func = caller.func;
            }
            self.caller = Some(caller.file_line);
        }

        if let Some(identifier) = self.func_identifier() {
            self.detach_fields(1).push(Field::new(SYS_FUNC_KEY, identifier));
        }
    }
}
