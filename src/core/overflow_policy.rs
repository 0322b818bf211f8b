//! Overflow policies for the output queue
//!
//! Every logger hands rendered lines to its output worker through a bounded
//! queue. These policies decide what a logging call does when that queue is
//! full.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Policy for handling a full output queue
///
/// # Example
///
/// ```
/// use rust_template_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// // Default behavior: alert and drop
/// let policy = OverflowPolicy::default();
///
/// // Wait a little, then give up
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the new line silently; only metrics record it
    DropNewest,

    /// Wait until the worker makes room
    ///
    /// The logging call blocks for as long as the sink is behind.
    Block,

    /// Wait up to the given duration, then drop with an alert
    BlockWithTimeout(Duration),

    /// Drop the new line, warn on stderr and notify the overflow callback
    ///
    /// The warning is issued on the first drop and every 1000th after it.
    #[default]
    AlertAndDrop,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::AlertAndDrop => write!(f, "AlertAndDrop"),
        }
    }
}

/// Callback type for overflow notifications
///
/// Called when lines are dropped because the queue is full.
/// The parameter is the total count of dropped lines so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
