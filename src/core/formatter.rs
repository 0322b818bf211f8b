//! Template-driven line formatter
//!
//! A [`Formatter`] pairs a template such as `[%s] %s %s: %s` with an ordered
//! list of [`Component`]s. Rendering replaces the n-th `%s` with the n-th
//! component's fragment and appends the call's terminator. `%%` stands for a
//! literal percent sign; any other `%` is copied as-is.
//!
//! The template is split into literal segments once, at construction, and a
//! template whose placeholder count differs from the component count is
//! rejected there rather than mis-rendered later.
//!
//! # Example
//!
//! ```
//! use rust_template_logger::{CallSite, Component, Formatter, LogLevel, LogRecord};
//! use std::fmt::Display;
//!
//! let formatter = Formatter::new(
//!     "%s | %s",
//!     vec![Component::Level, Component::Message],
//! )
//! .unwrap();
//!
//! let items: [&dyn Display; 2] = [&"disk at", &"91%"];
//! let record = LogRecord::new(
//!     LogLevel::Warning,
//!     &items,
//!     CallSite::default(),
//!     rust_template_logger::core::timestamp::now(),
//! );
//! assert_eq!(formatter.render(&record), "⚠ WARNING | disk at 91%\n");
//! assert_eq!(formatter.description(), "LEVEL | MESSAGE");
//! ```

use super::component::Component;
use super::error::{LoggerError, Result};
use super::log_entry::LogRecord;
use super::timestamp::DEFAULT_DATE_PATTERN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    template: String,
    /// Literal text around the placeholders; always `components.len() + 1` long
    segments: Vec<String>,
    components: Vec<Component>,
}

impl Formatter {
    /// Build a formatter, checking that `template` has exactly one `%s` per component
    pub fn new(template: impl Into<String>, components: Vec<Component>) -> Result<Self> {
        let template = template.into();
        let segments = split_template(&template);
        let placeholders = segments.len() - 1;

        if placeholders != components.len() {
            return Err(LoggerError::template_mismatch(
                placeholders,
                components.len(),
            ));
        }

        Ok(Self {
            template,
            segments,
            components,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Render one complete line, terminator included.
    ///
    /// Pure: the same formatter and record always yield the same string.
    #[must_use]
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let mut out = self.fill(self.components.iter().map(|c| c.render(record)));
        out.push_str(record.terminator);
        out
    }

    /// The template with each placeholder replaced by its component's
    /// uppercased name, e.g. `[DATE] LOCATION LEVEL: MESSAGE`
    pub fn description(&self) -> String {
        self.fill(self.components.iter().map(|c| c.name().to_uppercase()))
    }

    fn fill<I>(&self, fragments: I) -> String
    where
        I: Iterator<Item = String>,
    {
        let mut out = String::with_capacity(self.template.len() + 64);
        let mut segments = self.segments.iter();
        if let Some(first) = segments.next() {
            out.push_str(first);
        }
        for (fragment, segment) in fragments.zip(segments) {
            out.push_str(&fragment);
            out.push_str(segment);
        }
        out
    }

    /// `[%s] %s %s: %s` with date, location, level, message
    pub fn default_preset() -> Arc<Formatter> {
        Arc::clone(&DEFAULT_FORMATTER)
    }

    /// `%s %s: %s` with location, level, message
    pub fn minimal() -> Arc<Formatter> {
        Arc::clone(&MINIMAL_FORMATTER)
    }

    /// `[%s] %s.%s:%s %s: %s` with date, file stem, function, line, level, message
    pub fn detailed() -> Arc<Formatter> {
        Arc::clone(&DETAILED_FORMATTER)
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

fn split_template(template: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            current.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                segments.push(std::mem::take(&mut current));
            }
            Some('%') => {
                chars.next();
                current.push('%');
            }
            _ => current.push('%'),
        }
    }

    segments.push(current);
    segments
}

fn preset(template: &str, components: Vec<Component>) -> Arc<Formatter> {
    Arc::new(Formatter::new(template, components).expect("preset template matches its components"))
}

fn default_date() -> Component {
    Component::date(DEFAULT_DATE_PATTERN).expect("default date pattern is valid")
}

static DEFAULT_FORMATTER: LazyLock<Arc<Formatter>> = LazyLock::new(|| {
    preset(
        "[%s] %s %s: %s",
        vec![
            default_date(),
            Component::Location,
            Component::Level,
            Component::Message,
        ],
    )
});

static MINIMAL_FORMATTER: LazyLock<Arc<Formatter>> = LazyLock::new(|| {
    preset(
        "%s %s: %s",
        vec![Component::Location, Component::Level, Component::Message],
    )
});

static DETAILED_FORMATTER: LazyLock<Arc<Formatter>> = LazyLock::new(|| {
    preset(
        "[%s] %s.%s:%s %s: %s",
        vec![
            default_date(),
            Component::file(false, false),
            Component::Function,
            Component::Line,
            Component::Level,
            Component::Message,
        ],
    )
});

/// Named formatter presets, selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Preset {
    #[default]
    Default,
    Minimal,
    Detailed,
}

impl Preset {
    /// Shared formatter for this preset
    pub fn formatter(&self) -> Arc<Formatter> {
        match self {
            Preset::Default => Formatter::default_preset(),
            Preset::Minimal => Formatter::minimal(),
            Preset::Detailed => Formatter::detailed(),
        }
    }
}

impl FromStr for Preset {
    type Err = LoggerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "minimal" => Ok(Preset::Minimal),
            "detailed" => Ok(Preset::Detailed),
            _ => Err(LoggerError::InvalidPreset(s.to_string())),
        }
    }
}

impl TryFrom<String> for Preset {
    type Error = LoggerError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}
