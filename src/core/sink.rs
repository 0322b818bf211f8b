//! Sink trait for log output destinations

use super::{error::Result, log_entry::RenderedLine};

/// Destination for rendered lines.
///
/// A sink is owned by the logger's output worker and only ever called from
/// that thread, in submission order. `line.text` already carries its
/// terminator and must be written verbatim.
pub trait Sink: Send {
    fn write(&mut self, line: &RenderedLine) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl Sink for Box<dyn Sink> {
    fn write(&mut self, line: &RenderedLine) -> Result<()> {
        (**self).write(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
