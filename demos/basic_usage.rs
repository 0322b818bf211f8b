//! Basic logger usage example
//!
//! Demonstrates the presets, level filtering and the enabled flag.
//!
//! Run with: cargo run --example basic_usage

use rust_template_logger::prelude::*;
use rust_template_logger::{debug, error, info, warning};

fn main() -> Result<()> {
    println!("=== Rust Template Logger - Basic Usage Example ===\n");

    let logger = Logger::new(Formatter::default_preset(), LogLevel::Debug)?;
    println!("1. Default preset ({}):", logger.format());
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warning!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    logger.flush()?;

    println!("\n2. Minimum level WARNING - debug and info won't show:");
    logger.set_min_level(LogLevel::Warning);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warning!(logger, "Warning message (visible)");
    logger.flush()?;

    println!("\n3. Detailed preset ({}):", Formatter::detailed());
    logger.set_formatter(Formatter::detailed());
    error!(logger; separator = ", "; "code", 500, "retrying");
    logger.flush()?;

    println!("\n4. Disabled logger prints nothing:");
    logger.set_enabled(false);
    error!(logger, "never printed");
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
