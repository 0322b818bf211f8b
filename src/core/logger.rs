//! Main logger implementation

use super::{
    call_site::CallSite,
    config::LoggerConfig,
    error::{LoggerError, Result},
    formatter::{Formatter, Preset},
    log_entry::{LogRecord, RenderedLine, DEFAULT_SEPARATOR, DEFAULT_TERMINATOR},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    sink::Sink,
    timestamp,
    worker::{OutputWorker, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT},
};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Leveled logger writing formatted lines to a single sink.
///
/// Filtering and rendering happen on the calling thread; the finished line is
/// handed to the logger's output worker and written asynchronously. Logging
/// calls never return errors and never wait for the write.
///
/// `enabled`, the minimum level and the formatter can be changed at any time
/// through `&self`, so a logger is usually shared behind an `Arc`.
pub struct Logger {
    enabled: AtomicBool,
    min_level: RwLock<LogLevel>,
    formatter: RwLock<Arc<Formatter>>,
    worker: OutputWorker,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Console logger with the given formatter and minimum level
    pub fn new(formatter: impl Into<Arc<Formatter>>, min_level: LogLevel) -> Result<Self> {
        Logger::builder()
            .formatter(formatter)
            .min_level(min_level)
            .build()
    }

    /// Log `items` at `level`.
    ///
    /// Does nothing when the logger is disabled or `level` is below the
    /// minimum level. Otherwise the line is rendered now, stamped with the
    /// current local time, and queued for the sink.
    pub fn log(
        &self,
        level: LogLevel,
        items: &[&dyn Display],
        separator: &str,
        terminator: &str,
        call_site: CallSite<'_>,
    ) {
        if !self.would_log(level) {
            self.metrics.record_filtered();
            return;
        }

        let record = LogRecord {
            level,
            items,
            separator,
            terminator,
            call_site,
            timestamp: timestamp::now(),
        };

        let formatter = Arc::clone(&self.formatter.read());
        let text = formatter.render(&record);
        self.worker.submit(RenderedLine::new(level, text));
    }

    /// Whether a call at `level` would currently produce output
    #[inline]
    pub fn would_log(&self, level: LogLevel) -> bool {
        self.is_enabled() && level >= *self.min_level.read()
    }

    /// Log `items` at debug level, space separated and newline terminated.
    ///
    /// File, line and column come from the caller. The function name is not
    /// available to a method call and renders empty, so the `detailed` preset
    /// prints `logger.:42` for a call on line 42 of `logger.rs`. The
    /// [`debug!`](crate::debug) macro captures it.
    #[inline]
    #[track_caller]
    pub fn debug(&self, items: &[&dyn Display]) {
        self.log_at_caller(LogLevel::Debug, items, CallSite::caller());
    }

    /// Log `items` at info level; see [`Logger::debug`] for call-site capture.
    /// The [`info!`](crate::info) macro also records the function name.
    #[inline]
    #[track_caller]
    pub fn info(&self, items: &[&dyn Display]) {
        self.log_at_caller(LogLevel::Info, items, CallSite::caller());
    }

    /// Log `items` at warning level; see [`Logger::debug`] for call-site capture.
    /// The [`warning!`](crate::warning) macro also records the function name.
    #[inline]
    #[track_caller]
    pub fn warning(&self, items: &[&dyn Display]) {
        self.log_at_caller(LogLevel::Warning, items, CallSite::caller());
    }

    /// Log `items` at error level; see [`Logger::debug`] for call-site capture.
    /// The [`error!`](crate::error) macro also records the function name.
    #[inline]
    #[track_caller]
    pub fn error(&self, items: &[&dyn Display]) {
        self.log_at_caller(LogLevel::Error, items, CallSite::caller());
    }

    fn log_at_caller(&self, level: LogLevel, items: &[&dyn Display], call_site: CallSite<'_>) {
        self.log(level, items, DEFAULT_SEPARATOR, DEFAULT_TERMINATOR, call_site);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn formatter(&self) -> Arc<Formatter> {
        Arc::clone(&self.formatter.read())
    }

    /// Replace the formatter; calls already rendered are unaffected
    pub fn set_formatter(&self, formatter: impl Into<Arc<Formatter>>) {
        *self.formatter.write() = formatter.into();
    }

    /// Description of the current formatter, e.g. `[DATE] LOCATION LEVEL: MESSAGE`
    pub fn format(&self) -> String {
        self.formatter.read().description()
    }

    /// Logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use rust_template_logger::{Logger, LogLevel, MemorySink};
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Info)
    ///     .sink(MemorySink::new())
    ///     .build()
    ///     .unwrap();
    ///
    /// logger.debug(&[&"filtered"]);
    /// logger.info(&[&"kept"]);
    /// logger.flush().unwrap();
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.filtered_count(), 1);
    /// assert_eq!(metrics.lines_written(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Block until every line logged so far has been written and the sink flushed
    pub fn flush(&self) -> Result<()> {
        self.worker.flush(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    /// Gracefully shut the output worker down with a custom timeout
    ///
    /// Pending lines are drained before the worker exits. When the logger is
    /// dropped without calling this, [`DEFAULT_SHUTDOWN_TIMEOUT`] is used.
    /// Lines logged after shutdown are counted as dropped.
    ///
    /// # Returns
    ///
    /// `true` if the worker finished within `timeout`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_template_logger::Logger;
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::builder().build().unwrap();
    /// logger.info(&[&"Important message"]);
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.worker.shutdown(timeout)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_template_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Warning)
    ///     .preset(Preset::Minimal)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.format(), "LOCATION LEVEL: MESSAGE");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.worker.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
            return;
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped lines (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_template_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .formatter(Formatter::detailed())
///     .sink(ConsoleSink::new())
///     .queue_capacity(1000)
///     .overflow_policy(OverflowPolicy::AlertAndDrop)
///     .on_overflow(Arc::new(|count| {
///         eprintln!("ALERT: {} lines dropped", count);
///     }))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    enabled: bool,
    min_level: LogLevel,
    formatter: Arc<Formatter>,
    sink: Option<Box<dyn Sink>>,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl LoggerBuilder {
    /// Enabled, minimum level debug, default preset, console sink
    pub fn new() -> Self {
        Self {
            enabled: true,
            min_level: LogLevel::Debug,
            formatter: Formatter::default_preset(),
            sink: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
        }
    }

    /// Builder pre-populated from a configuration value
    pub fn from_config(config: &LoggerConfig) -> Self {
        let builder = Self::new()
            .enabled(config.enabled)
            .min_level(config.min_level)
            .preset(config.preset)
            .queue_capacity(config.queue_capacity);

        #[cfg(feature = "console")]
        if config.colors {
            return builder.sink(ConsoleSink::new().with_theme(crate::sinks::Theme::default()));
        }

        builder
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: impl Into<Arc<Formatter>>) -> Self {
        self.formatter = formatter.into();
        self
    }

    /// Use one of the shared preset formatters
    #[must_use = "builder methods return a new value"]
    pub fn preset(mut self, preset: Preset) -> Self {
        self.formatter = preset.formatter();
        self
    }

    /// Output destination; defaults to [`ConsoleSink`]
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Number of rendered lines the output queue holds
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// What a logging call does when the output queue is full.
    ///
    /// Default is `AlertAndDrop`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_template_logger::prelude::*;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::builder()
    ///     .queue_capacity(100)
    ///     .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(50)))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Called with the running total whenever the overflow policy alerts
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Build the Logger and start its output worker
    pub fn build(self) -> Result<Logger> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "queue capacity must be at least 1",
            ));
        }

        let metrics = Arc::new(LoggerMetrics::new());
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::new()));
        let worker = OutputWorker::spawn(
            sink,
            self.queue_capacity,
            self.overflow_policy,
            self.on_overflow,
            Arc::clone(&metrics),
        )?;

        Ok(Logger {
            enabled: AtomicBool::new(self.enabled),
            min_level: RwLock::new(self.min_level),
            formatter: RwLock::new(self.formatter),
            worker,
            metrics,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
