//! Output worker
//!
//! Every logger owns one worker thread that drains a bounded FIFO queue of
//! rendered lines into the logger's sink. Callers render on their own thread
//! and only hand over the finished string, so the sink sees lines in queue
//! order and never receives interleaved fragments.

use super::{
    error::{LoggerError, Result},
    log_entry::RenderedLine,
    metrics::LoggerMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    sink::Sink,
};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when the logger is dropped without an explicit `shutdown()`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of lines the output queue holds before the overflow policy applies
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

enum Command {
    Write(RenderedLine),
    /// Acknowledged once every earlier line is written and the sink flushed
    Flush(Sender<()>),
}

pub(crate) struct OutputWorker {
    sender: Option<Sender<Command>>,
    handle: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    /// Lines dropped because the queue was full; sink failures are not counted here
    overflow_drops: AtomicU64,
}

impl OutputWorker {
    pub(crate) fn spawn(
        sink: Box<dyn Sink>,
        capacity: usize,
        overflow_policy: OverflowPolicy,
        on_overflow: Option<OverflowCallback>,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let (sender, receiver) = bounded(capacity);
        let worker_metrics = Arc::clone(&metrics);

        let handle = thread::Builder::new()
            .name("log-output".to_string())
            .spawn(move || Self::run(sink, receiver, worker_metrics))?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            metrics,
            overflow_policy,
            on_overflow,
            overflow_drops: AtomicU64::new(0),
        })
    }

    fn run(mut sink: Box<dyn Sink>, receiver: Receiver<Command>, metrics: Arc<LoggerMetrics>) {
        let mut failure_reported = false;

        // Ends once the owning logger drops its sender and the queue is empty
        for command in receiver.iter() {
            match command {
                Command::Write(line) => match isolate(|| sink.write(&line)) {
                    Ok(()) => {
                        metrics.record_written();
                    }
                    Err(message) => {
                        metrics.record_dropped();
                        report_once(&mut failure_reported, sink.name(), "write", &message);
                    }
                },
                Command::Flush(ack) => {
                    if let Err(message) = isolate(|| sink.flush()) {
                        report_once(&mut failure_reported, sink.name(), "flush", &message);
                    }
                    // The flusher may have timed out and gone away
                    let _ = ack.send(());
                }
            }
        }

        if let Err(message) = isolate(|| sink.flush()) {
            report_once(&mut failure_reported, sink.name(), "flush", &message);
        }
    }

    /// Queue a line without waiting for it to be written
    pub(crate) fn submit(&self, line: RenderedLine) {
        let Some(sender) = &self.sender else {
            self.metrics.record_dropped();
            return;
        };

        match sender.try_send(Command::Write(line)) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => self.handle_overflow(sender, command),
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_dropped();
            }
        }
    }

    fn handle_overflow(&self, sender: &Sender<Command>, command: Command) {
        self.metrics.record_queue_full();

        match self.overflow_policy {
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped();
            }

            OverflowPolicy::Block => {
                self.metrics.record_block();
                if sender.send(command).is_err() {
                    self.metrics.record_dropped();
                }
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match sender.send_timeout(command, timeout) {
                    Ok(()) => {}
                    Err(SendTimeoutError::Timeout(_)) => {
                        self.alert_and_drop();
                    }
                    Err(SendTimeoutError::Disconnected(_)) => {
                        self.metrics.record_dropped();
                    }
                }
            }

            OverflowPolicy::AlertAndDrop => {
                self.alert_and_drop();
            }
        }
    }

    /// Drop the line, alerting on the first overflow drop and every 1000th after it.
    ///
    /// Returns whether an alert was raised.
    fn alert_and_drop(&self) -> bool {
        self.metrics.record_dropped();
        let overflow_drops = self.overflow_drops.fetch_add(1, Ordering::Relaxed) + 1;

        let should_alert = overflow_drops == 1 || overflow_drops % 1000 == 0;

        if should_alert {
            eprintln!(
                "[LOGGER WARNING] Output queue full, {} lines dropped. \
                 Consider a larger queue capacity or a blocking overflow policy.",
                overflow_drops
            );

            if let Some(callback) = &self.on_overflow {
                callback(overflow_drops);
            }
        }
        should_alert
    }

    /// Wait until every line queued before this call has reached the sink
    pub(crate) fn flush(&self, timeout: Duration) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::LoggerStopped)?;
        let (ack_sender, ack_receiver) = bounded(1);
        let start = Instant::now();

        match sender.send_timeout(Command::Flush(ack_sender), timeout) {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(_)) => return Err(LoggerError::FlushTimeout(timeout)),
            Err(SendTimeoutError::Disconnected(_)) => return Err(LoggerError::LoggerStopped),
        }

        let remaining = timeout.saturating_sub(start.elapsed());
        ack_receiver.recv_timeout(remaining).map_err(|e| {
            if e.is_timeout() {
                LoggerError::FlushTimeout(timeout)
            } else {
                LoggerError::LoggerStopped
            }
        })
    }

    /// Close the queue and wait up to `timeout` for the worker to drain it.
    ///
    /// Returns `true` if the worker finished in time. Later submissions are
    /// counted as dropped.
    pub(crate) fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Output worker panicked during shutdown: {:?}",
                        e
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Output worker did not finish within {:?}. \
                     Some lines may be lost.",
                    timeout
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(10));
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.sender.is_some()
    }
}

impl Drop for OutputWorker {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Run a sink operation, turning both errors and panics into a message
fn isolate<F>(operation: F) -> std::result::Result<(), String>
where
    F: FnOnce() -> Result<()>,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(operation)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic_info) => Err(if let Some(s) = panic_info.downcast_ref::<&str>() {
            format!("panicked: {}", s)
        } else if let Some(s) = panic_info.downcast_ref::<String>() {
            format!("panicked: {}", s)
        } else {
            "panicked".to_string()
        }),
    }
}

/// Report a sink failure on stderr unless one was already reported.
///
/// Returns whether this call printed the report.
fn report_once(reported: &mut bool, sink: &str, operation: &str, message: &str) -> bool {
    if *reported {
        return false;
    }
    *reported = true;
    eprintln!(
        "[LOGGER ERROR] Sink '{}' {} failed: {}. Further failures are counted but not reported.",
        sink, operation, message
    );
    true
}
