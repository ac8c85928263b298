//! Top-level constructors
//!
//! Each constructor binds a fresh [`Core`](crate::Core), applies `options`
//! in order and then sets the requested name. `new` keeps caller
//! auto-detection on; the named constructors turn it off.

use crate::core::{LogOption, Logger};

/// Unnamed logger with caller auto-detection enabled
pub fn new<I>(options: I) -> Logger
where
    I: IntoIterator<Item = LogOption>,
{
    Logger::new().apply(options)
}

pub fn package<I>(name: &str, options: I) -> Logger
where
    I: IntoIterator<Item = LogOption>,
{
    new(options).package(name)
}

pub fn func<I>(name: &str, options: I) -> Logger
where
    I: IntoIterator<Item = LogOption>,
{
    new(options).func(name)
}

pub fn class<I>(name: &str, options: I) -> Logger
where
    I: IntoIterator<Item = LogOption>,
{
    new(options).class(name)
}

/// Same as `class(class_name, options).method(method_name)`
pub fn method<I>(class_name: &str, method_name: &str, options: I) -> Logger
where
    I: IntoIterator<Item = LogOption>,
{
    new(options).class(class_name).method(method_name)
}
