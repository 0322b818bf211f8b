//! # Rust Template Logger
//!
//! A lightweight leveled logger. Each call is filtered by an enabled flag and
//! a minimum level, rendered on the calling thread by a template-driven
//! [`Formatter`], and written to the console by a single output worker.
//!
//! ## Features
//!
//! - **Composable formatting**: templates built from date, level, message,
//!   file, line, column, function, location and computed components
//! - **Presets**: `default`, `minimal` and `detailed` formatters shared process-wide
//! - **Non-blocking**: lines are handed to a FIFO output worker
//! - **Infallible calls**: logging never returns errors to the caller
//!
//! ## Example
//!
//! ```
//! use rust_template_logger::prelude::*;
//! use rust_template_logger::{info, warning};
//!
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Info)
//!     .preset(Preset::Minimal)
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "listening on port", 8080);
//! warning!(logger; separator = ", "; "disk", "91%");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, Component, DatePattern, Formatter, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, OverflowCallback, OverflowPolicy, Preset,
        Result, Sink, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink};
}

pub use self::core::{
    BlockFn, CallSite, Component, DatePattern, Formatter, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OverflowCallback, OverflowPolicy,
    Preset, RenderedLine, Result, Sink, DEFAULT_DATE_PATTERN, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SEPARATOR, DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_TERMINATOR,
};
pub use sinks::{ConsoleSink, MemorySink};
