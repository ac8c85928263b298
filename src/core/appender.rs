//! Appender trait for log output destinations

use super::{entry::Entry, error::Result};

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &Entry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
