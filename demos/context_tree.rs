//! Derives a small tree of loggers from one root
//!
//! Run with: cargo run --example context_tree

use rust_logger_context::prelude::*;
use rust_logger_context::{fields, info, options};

fn main() -> Result<()> {
    println!("=== Rust Logger Context - Context Tree Example ===\n");

    let root = Logger::builder()
        .min_level(LogLevel::Debug)
        .appender(ConsoleAppender::new())
        .build();

    println!("1. Caller auto-detection on the root logger:");
    info!(root, "root logger ready");

    println!("\n2. Named branches share the root's configuration:");
    let server = root.package("main").class("Server");
    let start = server.method("Start").with(fields!["port", 8080]);
    let stop = server.method("Stop").with(fields!["reason", "signal"]);
    start.info("listening");
    stop.warn("shutting down");

    println!("\n3. Fields added to one branch never show up on another:");
    let request = start.with(fields!["request_id", "abc-123", 42]);
    request.debug("request received");
    start.debug("no request fields here");

    println!("\n4. Options replace the core for one branch only:");
    let quiet = server.apply([options::min_level(LogLevel::Error)]);
    quiet.info("hidden");
    server.info("still visible");

    println!("\n5. A failed option disables the branch silently:");
    let broken = server.apply([options::min_level_str("loud")]);
    broken.package("other").error("never written");
    println!("   broken.is_valid() = {}", broken.is_valid());

    root.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
