//! Formatter components
//!
//! Each [`Component`] renders one fragment of a log line from a
//! [`LogRecord`]. A formatter substitutes the fragments into its template in
//! component order.

use super::error::Result;
use super::log_entry::{stringify, LogRecord, UNPRINTABLE};
use super::timestamp::DatePattern;
use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

/// Deferred computation evaluated on every render
pub type BlockFn = Arc<dyn Fn() -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub enum Component {
    /// Call timestamp rendered with a date pattern
    Date(DatePattern),
    /// Items joined by the call's separator
    Message,
    /// Glyph-tagged level name
    Level,
    /// Call-site file path
    File {
        full_path: bool,
        include_extension: bool,
    },
    Line,
    Column,
    Function,
    /// `File { full_path: false, include_extension: true }`, `:`, then `Line`
    Location,
    /// Computed at render time; `None` renders as an empty string
    Block(BlockFn),
}

impl Component {
    /// Date component for a Unicode-style pattern such as `yyyy-MM-dd HH:mm:ss.SSS`
    pub fn date(pattern: &str) -> Result<Self> {
        Ok(Component::Date(DatePattern::new(pattern)?))
    }

    /// File component
    pub fn file(full_path: bool, include_extension: bool) -> Self {
        Component::File {
            full_path,
            include_extension,
        }
    }

    /// Block component from any closure yielding an optional displayable value
    ///
    /// ```
    /// use rust_template_logger::Component;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    ///
    /// static REQUESTS: AtomicU32 = AtomicU32::new(7);
    /// let component = Component::block(|| Some(REQUESTS.load(Ordering::Relaxed)));
    /// assert_eq!(component.name(), "Block");
    /// ```
    pub fn block<F, T>(f: F) -> Self
    where
        F: Fn() -> Option<T> + Send + Sync + 'static,
        T: Display,
    {
        Component::Block(Arc::new(move || f().map(|value| stringify(&value))))
    }

    /// Variant name, used by [`Formatter::description`](super::Formatter::description)
    pub fn name(&self) -> &'static str {
        match self {
            Component::Date(_) => "Date",
            Component::Message => "Message",
            Component::Level => "Level",
            Component::File { .. } => "File",
            Component::Line => "Line",
            Component::Column => "Column",
            Component::Function => "Function",
            Component::Location => "Location",
            Component::Block(_) => "Block",
        }
    }

    /// Fragment this component contributes for `record`
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let site = &record.call_site;
        match self {
            Component::Date(pattern) => pattern.format(&record.timestamp),
            Component::Message => record.message(),
            Component::Level => record.level.display_form().to_string(),
            Component::File {
                full_path,
                include_extension,
            } => file_fragment(site.file, *full_path, *include_extension),
            Component::Line => site.line.to_string(),
            Component::Column => site.column.to_string(),
            Component::Function => site.function.to_string(),
            Component::Location => format!("{}:{}", file_fragment(site.file, false, true), site.line),
            Component::Block(f) => match panic::catch_unwind(AssertUnwindSafe(|| (**f)())) {
                Ok(value) => value.unwrap_or_default(),
                Err(_) => UNPRINTABLE.to_string(),
            },
        }
    }
}

fn file_fragment(file: &str, full_path: bool, include_extension: bool) -> String {
    let path = Path::new(file);
    let path = if full_path {
        path
    } else {
        path.file_name().map(Path::new).unwrap_or(path)
    };

    if include_extension {
        path.to_string_lossy().into_owned()
    } else {
        path.with_extension("").to_string_lossy().into_owned()
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Component::Date(a), Component::Date(b)) => a == b,
            (
                Component::File {
                    full_path: a_full,
                    include_extension: a_ext,
                },
                Component::File {
                    full_path: b_full,
                    include_extension: b_ext,
                },
            ) => a_full == b_full && a_ext == b_ext,
            (Component::Block(a), Component::Block(b)) => Arc::ptr_eq(a, b),
            (Component::Message, Component::Message)
            | (Component::Level, Component::Level)
            | (Component::Line, Component::Line)
            | (Component::Column, Component::Column)
            | (Component::Function, Component::Function)
            | (Component::Location, Component::Location) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Date(pattern) => f.debug_tuple("Date").field(&pattern.as_str()).finish(),
            Component::File {
                full_path,
                include_extension,
            } => f
                .debug_struct("File")
                .field("full_path", full_path)
                .field("include_extension", include_extension)
                .finish(),
            Component::Block(_) => f.write_str("Block(<fn>)"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::call_site::CallSite;
    use crate::core::log_level::LogLevel;
    use chrono::{DateTime, FixedOffset, TimeZone};

    const SITE: CallSite<'static> = CallSite::new("/a/b/widget.rs", 42, 7, "layout");

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 8, 5, 1)
            .unwrap()
    }

    fn render(component: &Component) -> String {
        let items: [&dyn Display; 2] = [&"hello", &5];
        let record = LogRecord::new(LogLevel::Warning, &items, SITE, at());
        component.render(&record)
    }

    #[test]
    fn test_file_variants() {
        assert_eq!(render(&Component::file(true, true)), "/a/b/widget.rs");
        assert_eq!(render(&Component::file(true, false)), "/a/b/widget");
        assert_eq!(render(&Component::file(false, true)), "widget.rs");
        assert_eq!(render(&Component::file(false, false)), "widget");
    }

    #[test]
    fn test_location_matches_file_and_line() {
        assert_eq!(render(&Component::Location), "widget.rs:42");
        assert_eq!(
            render(&Component::Location),
            format!(
                "{}:{}",
                render(&Component::file(false, true)),
                render(&Component::Line)
            )
        );
    }

    #[test]
    fn test_scalar_components() {
        assert_eq!(render(&Component::Line), "42");
        assert_eq!(render(&Component::Column), "7");
        assert_eq!(render(&Component::Function), "layout");
        assert_eq!(render(&Component::Level), "⚠ WARNING");
        assert_eq!(render(&Component::Message), "hello 5");
        assert_eq!(
            render(&Component::date("yyyy/MM/dd HH:mm:ss").unwrap()),
            "2024/03/09 08:05:01"
        );
    }

    #[test]
    fn test_block_component() {
        assert_eq!(render(&Component::block(|| Some("ctx-1"))), "ctx-1");
        assert_eq!(render(&Component::block(|| None::<u32>)), "");
        assert_eq!(
            render(&Component::block(|| -> Option<u8> { panic!("boom") })),
            UNPRINTABLE
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(Component::file(false, true), Component::file(false, true));
        assert_ne!(Component::file(false, true), Component::file(true, true));
        assert_eq!(
            Component::date("yyyy").unwrap(),
            Component::date("yyyy").unwrap()
        );
        assert_ne!(Component::Line, Component::Column);

        let block = Component::block(|| Some(1));
        assert_eq!(block.clone(), block);
        assert_ne!(block, Component::block(|| Some(1)));
    }

    #[test]
    fn test_invalid_date_pattern() {
        assert!(Component::date("yyyy-QQ").is_err());
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", Component::Location), "Location");
        assert_eq!(
            format!("{:?}", Component::date("HH").unwrap()),
            "Date(\"HH\")"
        );
        assert_eq!(format!("{:?}", Component::block(|| Some(1))), "Block(<fn>)");
    }
}
