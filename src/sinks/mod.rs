//! Sink implementations

pub mod console;
pub mod memory;

pub use console::ConsoleSink;
#[cfg(feature = "console")]
pub use console::Theme;
pub use memory::MemorySink;

pub use crate::core::Sink;
