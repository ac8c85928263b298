//! Console appender implementation

use crate::core::{Appender, Entry, LogLevel, Result};
use chrono::SecondsFormat;
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render an entry as one line of text
    fn format_text(&self, entry: &Entry) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", entry.level().to_str())
                .color(entry.level().color_code())
                .to_string()
        } else {
            format!("{:5}", entry.level().to_str())
        };

        let timestamp_str = entry
            .timestamp()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();

        let mut line = format!("[{}] [{}]", timestamp_str, level_str);
        if let Some(package) = entry.package_name() {
            line.push_str(&format!(" {}", package));
        }
        if let Some(group) = entry.group() {
            line.push_str(&format!(" ({})", group));
        }
        line.push_str(&format!(" - {}", entry.message()));

        for field in entry.fields() {
            line.push_str(&format!(" {}", field));
        }
        if let Some(caller) = entry.caller() {
            line.push_str(&format!(" @ {}", caller));
        }

        line
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &Entry) -> Result<()> {
        let output = self.format_text(entry);

        // Route Error and Fatal levels to stderr, others to stdout
        match entry.level() {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
