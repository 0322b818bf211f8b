//! Logging macros.
//!
//! The macros capture the full call site (file, line, column and enclosing
//! function name) and accept any number of `Display` items, which the
//! `Message` component joins with the separator.
//!
//! # Examples
//!
//! ```
//! use rust_template_logger::prelude::*;
//! use rust_template_logger::{debug, error, info};
//!
//! let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port", port);
//!
//! // Custom separator and terminator
//! debug!(logger; separator = ", "; "user", 42, "login");
//! error!(logger; separator = "", terminator = "\r\n"; "code=", 500);
//! ```

/// Log items at a level with full call-site capture.
///
/// ```
/// # use rust_template_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use rust_template_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error; separator = ": "; "Error code", 500);
/// log!(logger, LogLevel::Debug; terminator = ""; "no newline");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr; separator = $sep:expr, terminator = $term:expr; $($item:expr),* $(,)?) => {
        $logger.log(
            $level,
            &[$(&$item as &dyn ::std::fmt::Display),*],
            $sep,
            $term,
            $crate::call_site!(),
        )
    };
    ($logger:expr, $level:expr; separator = $sep:expr; $($item:expr),* $(,)?) => {
        $crate::log!($logger, $level; separator = $sep, terminator = $crate::DEFAULT_TERMINATOR; $($item),*)
    };
    ($logger:expr, $level:expr; terminator = $term:expr; $($item:expr),* $(,)?) => {
        $crate::log!($logger, $level; separator = $crate::DEFAULT_SEPARATOR, terminator = $term; $($item),*)
    };
    ($logger:expr, $level:expr $(, $item:expr)* $(,)?) => {
        $crate::log!(
            $logger,
            $level;
            separator = $crate::DEFAULT_SEPARATOR,
            terminator = $crate::DEFAULT_TERMINATOR;
            $($item),*
        )
    };
}

/// Log a debug-level message.
///
/// ```
/// # use rust_template_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use rust_template_logger::debug;
/// debug!(logger, "Counter value:", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr; $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug; $($rest)+)
    };
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug $(, $item)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr; $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info; $($rest)+)
    };
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info $(, $item)*)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_template_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use rust_template_logger::warning;
/// warning!(logger, "Retry attempt", 3, "of", 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr; $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning; $($rest)+)
    };
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warning $(, $item)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr; $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error; $($rest)+)
    };
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error $(, $item)*)
    };
}
