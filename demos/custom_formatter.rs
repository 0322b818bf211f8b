//! Custom formatter example
//!
//! Builds a formatter from components, including a computed block, and shares
//! one logger between threads.
//!
//! Run with: cargo run --example custom_formatter

use rust_template_logger::prelude::*;
use rust_template_logger::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

static REQUESTS: AtomicU64 = AtomicU64::new(0);

fn main() -> Result<()> {
    println!("=== Rust Template Logger - Custom Formatter Example ===\n");

    let formatter = Formatter::new(
        "%s #%s [%s] %s:%s %s > %s",
        vec![
            Component::date("HH:mm:ss.SSS")?,
            Component::block(|| Some(REQUESTS.fetch_add(1, Ordering::Relaxed))),
            Component::block(|| thread::current().name().map(str::to_owned)),
            Component::file(false, false),
            Component::Line,
            Component::Level,
            Component::Message,
        ],
    )?;
    println!("Format: {}\n", formatter);

    let logger = Arc::new(
        Logger::builder()
            .formatter(formatter)
            .overflow_policy(OverflowPolicy::Block)
            .build()?,
    );

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::Builder::new()
                .name(format!("worker-{}", worker))
                .spawn(move || {
                    for job in 0..3 {
                        info!(logger, "finished job", job);
                    }
                })
        })
        .collect::<std::io::Result<_>>()?;

    for handle in handles {
        let _ = handle.join();
    }
    logger.flush()?;

    println!("\nLines written: {}", logger.metrics().lines_written());
    Ok(())
}
