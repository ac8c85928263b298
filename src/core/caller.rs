//! Caller inspection used when an entry has no explicit name

use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub module_path: Option<&'static str>,
}

impl CallSite {
    /// Location of whoever called the `#[track_caller]` chain leading here
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            module_path: None,
        }
    }

    pub const fn new(file: &'static str, line: u32, module_path: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            module_path,
        }
    }
}

/// Naming resolved from a call site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub package: Option<String>,
    pub func: Option<String>,
    pub file_line: String,
}

/// Resolves a call site into package/function names.
///
/// Invoked at most once per emitted entry, and only when caller
/// auto-detection is still enabled on it.
pub trait CallerInspector: Send + Sync + fmt::Debug {
    fn capture(&self, site: &CallSite) -> Caller;
}

/// Default inspector built on `std::panic::Location`.
///
/// Stable Rust cannot name the enclosing function, so only the package is
/// resolved: from the module path when the call came through a macro,
/// otherwise from the source file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationInspector;

impl CallerInspector for LocationInspector {
    fn capture(&self, site: &CallSite) -> Caller {
        let package = match site.module_path {
            Some(path) => Some(path.to_string()),
            None => package_from_file(site.file),
        };
        Caller {
            package,
            func: None,
            file_line: format!("{}:{}", site.file, site.line),
        }
    }
}

fn package_from_file(file: &str) -> Option<String> {
    let path = Path::new(file);
    let stem = path.file_stem()?.to_str()?;
    if matches!(stem, "mod" | "lib" | "main") {
        if let Some(dir) = path.parent().and_then(Path::file_name).and_then(|d| d.to_str()) {
            return Some(dir.to_string());
        }
    }
    Some(stem.to_string())
}
