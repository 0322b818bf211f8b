//! Core logger types and traits

pub mod call_site;
pub mod component;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod sink;
pub mod timestamp;
mod worker;

pub use call_site::CallSite;
pub use component::{BlockFn, Component};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, Preset};
pub use log_entry::{LogRecord, RenderedLine, DEFAULT_SEPARATOR, DEFAULT_TERMINATOR, UNPRINTABLE};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use sink::Sink;
pub use timestamp::{DatePattern, DEFAULT_DATE_PATTERN};
pub use worker::{DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
