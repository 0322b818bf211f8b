//! Integration tests for the template logger
//!
//! These tests verify:
//! - Level filtering and the enabled flag
//! - Preset rendering end to end
//! - Custom formatters with computed blocks
//! - Failure isolation (unprintable items, failing sinks)
//! - Configuration through the builder

use rust_template_logger::core::component::Component;
use rust_template_logger::core::formatter::{Formatter, Preset};
use rust_template_logger::core::log_level::LogLevel;
use rust_template_logger::core::logger::Logger;
use rust_template_logger::{
    error, info, warning, CallSite, LogRecord, LoggerConfig, LoggerError, MemorySink,
    RenderedLine, Sink,
};
use chrono::{FixedOffset, TimeZone};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn memory_logger(formatter: Arc<Formatter>) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .formatter(formatter)
        .sink(sink.clone())
        .build()
        .expect("Failed to build logger");
    (logger, sink)
}

#[test]
fn test_min_level_filtering() {
    let (logger, sink) = memory_logger(Formatter::minimal());
    logger.set_min_level(LogLevel::Warning);

    info!(logger, "Info message");
    logger.debug(&[&"Debug message"]);
    warning!(logger, "Warn message");
    error!(logger, "Error message");
    logger.flush().expect("Failed to flush");

    let content = sink.contents();
    assert!(!content.contains("Debug message"));
    assert!(!content.contains("Info message"));
    assert!(content.contains("⚠ WARNING: Warn message"));
    assert!(content.contains("❌ ERROR: Error message"));
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_disabled_logger_produces_nothing() {
    let (logger, sink) = memory_logger(Formatter::default_preset());
    logger.set_enabled(false);

    for level in LogLevel::ALL {
        logger.log(level, &[&"hidden"], " ", "\n", CallSite::caller());
    }
    logger.flush().expect("Failed to flush");

    assert!(sink.is_empty());
}

#[test]
fn test_minimal_preset_line() {
    let (logger, sink) = memory_logger(Formatter::minimal());

    logger.log(
        LogLevel::Error,
        &[&"boom"],
        " ",
        "\n",
        CallSite::new("/a/b/widget.rs", 42, 5, "layout"),
    );
    logger.flush().expect("Failed to flush");

    assert_eq!(sink.lines(), vec!["widget.rs:42 ❌ ERROR: boom\n"]);
}

#[test]
fn test_default_preset_shape() {
    let (logger, sink) = memory_logger(Formatter::default_preset());

    let line = line!() + 1;
    info!(logger, "ready");
    logger.flush().expect("Failed to flush");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let text = &lines[0];

    // [yyyy-MM-dd HH:mm:ss.SSS] is 25 characters
    assert!(text.starts_with('['));
    assert_eq!(&text[24..26], "] ");
    assert!(
        text.ends_with(&format!(
            " integration_tests.rs:{} 💬 INFO: ready\n",
            line
        )),
        "unexpected line {:?}",
        text
    );
}

#[test]
fn test_detailed_preset_uses_function_name() {
    let (logger, sink) = memory_logger(Formatter::detailed());

    warning!(logger, "slow", 250, "ms");
    logger.flush().expect("Failed to flush");

    let text = &sink.lines()[0];
    assert!(
        text.contains("integration_tests.test_detailed_preset_uses_function_name:"),
        "unexpected line {:?}",
        text
    );
    assert!(text.ends_with("⚠ WARNING: slow 250 ms\n"));
}

#[test]
fn test_block_component_evaluated_per_call() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);
    let formatter = Formatter::new(
        "#%s %s",
        vec![
            Component::block(move || Some(counter_clone.fetch_add(1, Ordering::SeqCst))),
            Component::Message,
        ],
    )
    .expect("valid formatter");

    let (logger, sink) = memory_logger(Arc::new(formatter));
    info!(logger, "a");
    info!(logger, "b");
    logger.set_min_level(LogLevel::Error);
    info!(logger, "filtered");
    logger.flush().expect("Failed to flush");

    assert_eq!(sink.lines(), vec!["#0 a\n", "#1 b\n"]);
    // Filtered calls never reach the formatter
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_template_mismatch_fails_fast() {
    let err = Formatter::new("[%s] %s", vec![Component::Message]).unwrap_err();
    assert!(matches!(err, LoggerError::TemplateMismatch { .. }));
    assert!(err.to_string().contains("2 placeholder(s)"));
}

#[test]
fn test_unprintable_item_does_not_fail_call() {
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    let formatter = Formatter::new("%s", vec![Component::Message]).expect("valid formatter");
    let (logger, sink) = memory_logger(Arc::new(formatter));

    error!(logger, "value:", Broken);
    logger.flush().expect("Failed to flush");

    assert_eq!(sink.lines(), vec!["value: <unprintable>\n"]);
}

#[test]
fn test_failing_sink_is_isolated() {
    struct FailingSink {
        attempts: Arc<AtomicUsize>,
    }

    impl Sink for FailingSink {
        fn write(&mut self, _line: &RenderedLine) -> rust_template_logger::Result<()> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            Err(LoggerError::sink("Simulated failure"))
        }

        fn flush(&mut self) -> rust_template_logger::Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "FailingSink"
        }
    }

    let attempts = Arc::new(AtomicUsize::new(0));
    let logger = Logger::builder()
        .sink(FailingSink {
            attempts: Arc::clone(&attempts),
        })
        .build()
        .expect("Failed to build logger");

    for _ in 0..5 {
        info!(logger, "Test message");
    }
    logger.flush().expect("Failed to flush");

    assert_eq!(attempts.load(Ordering::Relaxed), 5);
    assert_eq!(logger.dropped_count(), 5, "Should track all dropped lines");
}

#[test]
fn test_render_is_pure() {
    let at = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 12, 31, 23, 59, 59)
        .unwrap();
    let items: [&dyn fmt::Display; 3] = [&1, &"x", &true];
    let record = LogRecord::new(
        LogLevel::Info,
        &items,
        CallSite::new("src/app/widget.rs", 7, 2, "draw"),
        at,
    )
    .with_separator(", ");

    for preset in [Preset::Default, Preset::Minimal, Preset::Detailed] {
        let formatter = preset.formatter();
        assert_eq!(formatter.render(&record), formatter.render(&record));
    }
    assert_eq!(
        Formatter::default_preset().render(&record),
        "[2024-12-31 23:59:59.000] widget.rs:7 💬 INFO: 1, x, true\n"
    );
    assert_eq!(
        Formatter::detailed().render(&record),
        "[2024-12-31 23:59:59.000] widget.draw:7 💬 INFO: 1, x, true\n"
    );
}

#[test]
fn test_config_driven_logger() {
    let config: LoggerConfig =
        serde_json::from_str(r#"{"min_level":"info","preset":"minimal","queue_capacity":32}"#)
            .expect("valid config");

    let sink = MemorySink::new();
    let logger = rust_template_logger::LoggerBuilder::from_config(&config)
        .sink(sink.clone())
        .build()
        .expect("Failed to build logger");

    assert_eq!(logger.format(), "LOCATION LEVEL: MESSAGE");
    logger.debug(&[&"hidden"]);
    logger.info(&[&"shown"]);
    logger.flush().expect("Failed to flush");

    assert_eq!(sink.len(), 1);
    assert!(sink.contents().ends_with("💬 INFO: shown\n"));
}
