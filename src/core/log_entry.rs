//! Log record structures
//!
//! A [`LogRecord`] carries everything one log call contributes to rendering.
//! It borrows the caller's items, so building one never allocates. The
//! rendered result travels to the output worker as a [`RenderedLine`].

use super::call_site::CallSite;
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset};
use std::fmt::{self, Display, Write as _};
use std::panic::{self, AssertUnwindSafe};

/// Separator placed between items when the caller does not choose one
pub const DEFAULT_SEPARATOR: &str = " ";

/// Terminator appended to every line when the caller does not choose one
pub const DEFAULT_TERMINATOR: &str = "\n";

/// Text used for a value whose `Display` impl fails or panics
pub const UNPRINTABLE: &str = "<unprintable>";

#[derive(Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub items: &'a [&'a dyn Display],
    pub separator: &'a str,
    pub terminator: &'a str,
    pub call_site: CallSite<'a>,
    pub timestamp: DateTime<FixedOffset>,
}

impl<'a> LogRecord<'a> {
    /// Record with the default separator and terminator
    pub fn new(
        level: LogLevel,
        items: &'a [&'a dyn Display],
        call_site: CallSite<'a>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            level,
            items,
            separator: DEFAULT_SEPARATOR,
            terminator: DEFAULT_TERMINATOR,
            call_site,
            timestamp,
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: &'a str) -> Self {
        self.terminator = terminator;
        self
    }

    /// Items joined by the separator
    pub fn message(&self) -> String {
        let mut out = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(self.separator);
            }
            out.push_str(&stringify(*item));
        }
        out
    }
}

impl fmt::Debug for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("level", &self.level)
            .field("message", &self.message())
            .field("terminator", &self.terminator)
            .field("call_site", &self.call_site)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// Display `value` into a fresh string.
///
/// Never fails: an erroring or panicking `Display` impl yields [`UNPRINTABLE`].
pub fn stringify(value: &dyn Display) -> String {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut out = String::new();
        write!(out, "{}", value).map(|()| out)
    }));

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(_)) | Err(_) => UNPRINTABLE.to_string(),
    }
}

/// A fully rendered line on its way to the sink.
///
/// `text` already ends with the caller's terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub level: LogLevel,
    pub text: String,
}

impl RenderedLine {
    pub fn new(level: LogLevel, text: String) -> Self {
        Self { level, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Broken;

    impl Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn epoch() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_opt(0, 0)
            .unwrap()
    }

    #[test]
    fn test_message_joins_items() {
        let items: [&dyn Display; 3] = [&1, &"x", &true];
        let record = LogRecord::new(LogLevel::Info, &items, CallSite::default(), epoch())
            .with_separator(", ");
        assert_eq!(record.message(), "1, x, true");
    }

    #[test]
    fn test_message_defaults() {
        let items: [&dyn Display; 2] = [&"a", &2.5];
        let record = LogRecord::new(LogLevel::Info, &items, CallSite::default(), epoch());
        assert_eq!(record.message(), "a 2.5");
        assert_eq!(record.terminator, "\n");

        let record = LogRecord::new(LogLevel::Info, &[], CallSite::default(), epoch());
        assert_eq!(record.message(), "");
    }

    #[test]
    fn test_unprintable_item_falls_back() {
        let items: [&dyn Display; 3] = [&"before", &Broken, &"after"];
        let record = LogRecord::new(LogLevel::Error, &items, CallSite::default(), epoch());
        assert_eq!(record.message(), "before <unprintable> after");
    }
}
