//! Integration tests for logger derivation
//!
//! These tests verify:
//! - Naming scenarios across chained derivations
//! - Positional field resolution
//! - Independence of diverging branches
//! - Disabled logger propagation
//! - Sharing a logger tree across threads

use rust_logger_context::options;
use rust_logger_context::prelude::*;
use rust_logger_context::{fields, SYS_FUNC_KEY};
use std::sync::Arc;
use std::thread;

fn keys(logger: &Logger) -> Vec<String> {
    logger
        .entry()
        .expect("valid logger")
        .fields()
        .iter()
        .map(|field| field.key.clone())
        .collect()
}

#[test]
fn test_package_class_method_scenario() {
    let l0 = rust_logger_context::new(Vec::new());
    let l1 = l0.package("main");
    let l2 = l1.class("Server");
    let l3 = l2.method("Start");

    let entry = l3.entry().unwrap();
    assert_eq!(entry.package_name(), Some("main"));
    assert_eq!(entry.func_name(), None);
    assert_eq!(entry.class_name(), Some("Server"));
    assert_eq!(entry.method_name(), Some("Start"));
    assert!(!entry.caller_auto_detect());
    assert_eq!(entry.func_identifier().as_deref(), Some("Server.Start"));

    let root = l0.entry().unwrap();
    assert_eq!(root.package_name(), None);
    assert_eq!(root.func_name(), None);
    assert_eq!(root.class_name(), None);
    assert_eq!(root.method_name(), None);
    assert!(root.caller_auto_detect());
}

#[test]
fn test_positional_fields_scenario() {
    let logger = Logger::new().with(fields!["user", "alice", 42]);
    let fields = logger.entry().unwrap().fields();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].key, "user");
    assert_eq!(fields[0].value, FieldValue::from("alice"));
    assert_eq!(fields[0].kind, FieldKind::Implicit);
    assert_eq!(fields[1].key, Field::auto_key(1));
    assert_eq!(fields[1].value, FieldValue::Int(42));
}

#[test]
fn test_malformed_pair_is_dropped_rest_applies() {
    let logger = Logger::new().with(fields![(404, "not a key"), "status", "ok", ("code", 7)]);
    assert_eq!(keys(&logger), vec!["status", "code"]);
}

#[test]
fn test_diverging_branches_do_not_alias() {
    let base = Logger::new().with(fields!["shared", true]);
    let a = base.with(fields!["k", "v"]);
    let b = base.with(fields!["k2", "v2"]);

    assert_eq!(keys(&a), vec!["shared", "k"]);
    assert_eq!(keys(&b), vec!["shared", "k2"]);
    assert_eq!(keys(&base), vec!["shared"]);
}

#[test]
fn test_repeated_growth_on_branch_keeps_parent_frozen() {
    let base = Logger::new().with(fields!["a", 1]);
    let mut branch = base.clone();
    for i in 0..10 {
        branch = branch.with(fields![format!("k{}", i), i]);
    }

    assert_eq!(keys(&base), vec!["a"]);
    assert_eq!(keys(&branch).len(), 11);
}

#[test]
fn test_with_strict_appends_explicit_fields() {
    let logger = Logger::new()
        .with(fields!["k", "implicit"])
        .with_strict([Field::new("k", "explicit"), Field::new("retries", 3)]);

    let entry = logger.entry().unwrap();
    assert_eq!(entry.fields().len(), 3);
    assert_eq!(entry.fields()[1].kind, FieldKind::Explicit);
    assert_eq!(entry.field("k"), Some(&FieldValue::from("explicit")));
}

#[test]
fn test_error_and_opaque_fields() {
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    let logger = Logger::new().with(fields![
        ("cause", FieldValue::error(io)),
        ("shape", FieldValue::opaque((3, 4)))
    ]);

    let entry = logger.entry().unwrap();
    assert_eq!(entry.field("cause").unwrap().to_string(), "upstream timed out");
    assert_eq!(entry.field("shape").unwrap().to_string(), "(3, 4)");
}

#[test]
fn test_disabled_logger_stays_disabled() {
    let disabled = Logger::new().apply([options::disable()]);
    assert!(!disabled.is_valid());

    let chained = disabled
        .package("main")
        .func("run")
        .with(fields!["k", "v"])
        .with_strict([Field::new("x", 1)])
        .apply([options::caller_info(true)])
        .group("g");

    assert!(chained.ptr_eq(&disabled));
    assert!(!chained.is_valid());
}

#[test]
fn test_group_keeps_names() {
    let logger = Logger::new().package("main").func("run").group("jobs");
    let entry = logger.entry().unwrap();
    assert_eq!(entry.group(), Some("jobs"));
    assert_eq!(entry.func_name(), Some("run"));
}

#[test]
fn test_emission_through_shared_core() {
    let memory = MemoryAppender::new();
    let root = Logger::builder()
        .min_level(LogLevel::Debug)
        .appender(memory.clone())
        .build();

    let worker = root.package("jobs").func("worker").with(fields!["id", 7]);
    worker.debug("picked up");
    root.package("jobs").info("idle");

    let entries = memory.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].field("id"), Some(&FieldValue::Int(7)));
    assert_eq!(entries[0].field(SYS_FUNC_KEY), Some(&FieldValue::from("worker")));
    assert!(entries[1].field("id").is_none());
    assert_eq!(entries[1].field(SYS_FUNC_KEY), Some(&FieldValue::from("jobs")));
}

#[test]
fn test_package_constructor_emits_sys_func() {
    let memory = MemoryAppender::new();
    let logger = rust_logger_context::package("main", [options::appender(memory.clone())]);

    logger.info("started");
    logger.class("Server").info("serving");

    let entries = memory.entries();
    assert_eq!(entries[0].field(SYS_FUNC_KEY), Some(&FieldValue::from("main")));
    assert_eq!(entries[1].field(SYS_FUNC_KEY), Some(&FieldValue::from("Server")));
}

#[test]
fn test_caller_detection_fills_package() {
    let memory = MemoryAppender::new();
    let logger = Logger::builder().appender(memory.clone()).build();

    logger.info("detected");

    let entry = &memory.entries()[0];
    assert_eq!(entry.package_name(), Some("integration_tests"));
    assert!(entry.caller().unwrap().contains("integration_tests.rs"));
}

#[test]
fn test_core_option_branch_keeps_appenders() {
    let memory = MemoryAppender::new();
    let root = Logger::builder().appender(memory.clone()).build();
    let verbose = root.apply([options::min_level(LogLevel::Trace)]);

    root.trace("dropped by root threshold");
    verbose.trace("kept by branch threshold");

    assert_eq!(memory.len(), 1);
    assert_eq!(memory.entries()[0].message(), "kept by branch threshold");
}

#[test]
fn test_appender_option_adds_destination_to_branch_only() {
    let extra = MemoryAppender::new();
    let root = Logger::new();
    let audited = root.apply([options::appender(extra.clone())]);

    root.warn("not audited");
    audited.warn("audited");

    assert_eq!(extra.len(), 1);
    assert_eq!(root.core().unwrap().appender_count(), 0);
    assert_eq!(audited.core().unwrap().appender_names(), vec!["memory"]);
}

#[test]
fn test_branches_from_many_threads() {
    let memory = MemoryAppender::new();
    let root = Logger::builder()
        .appender(memory.clone())
        .caller_info(false)
        .build()
        .with(fields!["service", "api"]);
    let root = Arc::new(root);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let root = Arc::clone(&root);
            thread::spawn(move || {
                let mut logger = root.func("worker").with(fields!["worker", worker]);
                for step in 0..25 {
                    logger = logger.with(fields!["step", step]);
                    logger.info("tick");
                }
                logger
            })
        })
        .collect();

    let branches: Vec<Logger> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker thread panicked"))
        .collect();

    assert_eq!(memory.len(), 8 * 25);
    assert_eq!(keys(&root), vec!["service"]);
    for (worker, branch) in branches.iter().enumerate() {
        let entry = branch.entry().unwrap();
        assert_eq!(entry.fields().len(), 2 + 25);
        assert_eq!(entry.field("worker"), Some(&FieldValue::from(worker)));
        assert_eq!(entry.field("step"), Some(&FieldValue::Int(24)));
    }
}
