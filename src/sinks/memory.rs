//! In-memory sink
//!
//! Collects rendered lines instead of printing them. Clones share the same
//! buffer, so a test or host application can keep one handle and give the
//! other to the logger.

use crate::core::{RenderedLine, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<RenderedLine>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every captured line, terminators included
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|l| l.text.clone()).collect()
    }

    pub fn records(&self) -> Vec<RenderedLine> {
        self.lines.lock().clone()
    }

    /// Everything written so far, as one string
    pub fn contents(&self) -> String {
        self.lines.lock().iter().map(|l| l.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, line: &RenderedLine) -> Result<()> {
        self.lines.lock().push(line.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
