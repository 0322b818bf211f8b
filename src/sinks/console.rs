//! Console sink implementation

use crate::core::{RenderedLine, Result, Sink};
use std::borrow::Cow;
use std::io::Write;

#[cfg(feature = "console")]
use crate::core::LogLevel;
#[cfg(feature = "console")]
use colored::{Color, Colorize};

/// Per-level colours applied by [`ConsoleSink`]
#[cfg(feature = "console")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub debug: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

#[cfg(feature = "console")]
impl Theme {
    pub fn color_for(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Debug => self.debug,
            LogLevel::Info => self.info,
            LogLevel::Warning => self.warning,
            LogLevel::Error => self.error,
        }
    }

    /// Muted variant for light terminals
    pub fn dusk() -> Self {
        Self {
            debug: Color::BrightBlack,
            info: Color::Cyan,
            warning: Color::Magenta,
            error: Color::BrightRed,
        }
    }
}

#[cfg(feature = "console")]
impl Default for Theme {
    fn default() -> Self {
        Self {
            debug: LogLevel::Debug.color_code(),
            info: LogLevel::Info.color_code(),
            warning: LogLevel::Warning.color_code(),
            error: LogLevel::Error.color_code(),
        }
    }
}

/// Writes every line to standard output.
///
/// Lines are written exactly as rendered; the formatter already appended the
/// terminator. With a theme set, the line body (not the trailing line break)
/// is coloured by level.
pub struct ConsoleSink {
    #[cfg(feature = "console")]
    theme: Option<Theme>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "console")]
            theme: None,
        }
    }

    /// Colour output by level
    ///
    /// # Example
    ///
    /// ```
    /// use rust_template_logger::sinks::{ConsoleSink, Theme};
    ///
    /// let sink = ConsoleSink::new().with_theme(Theme::dusk());
    /// ```
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    #[cfg(feature = "console")]
    fn styled<'a>(&self, line: &'a RenderedLine) -> Cow<'a, str> {
        match &self.theme {
            Some(theme) => {
                let body = line.text.trim_end_matches(['\r', '\n']);
                let tail = &line.text[body.len()..];
                let colored = body.color(theme.color_for(line.level));
                Cow::Owned(format!("{}{}", colored, tail))
            }
            None => Cow::Borrowed(line.text.as_str()),
        }
    }

    #[cfg(not(feature = "console"))]
    fn styled<'a>(&self, line: &'a RenderedLine) -> Cow<'a, str> {
        Cow::Borrowed(line.text.as_str())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, line: &RenderedLine) -> Result<()> {
        let text = self.styled(line);
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_plain_line_is_untouched() {
        let sink = ConsoleSink::new();
        let line = RenderedLine::new(LogLevel::Info, "hello\n".to_string());
        assert_eq!(sink.styled(&line), "hello\n");
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_theme_keeps_terminator_outside_colour() {
        // Holds whether or not colouring is active for this process
        let sink = ConsoleSink::new().with_theme(Theme::default());
        let line = RenderedLine::new(LogLevel::Error, "boom\r\n".to_string());
        let styled = sink.styled(&line);

        let body = styled
            .strip_suffix("\r\n")
            .unwrap_or_else(|| panic!("terminator missing in {:?}", styled));
        assert!(!body.contains(['\r', '\n']), "got {:?}", styled);
        assert!(body.ends_with("boom") || body.ends_with("\u{1b}[0m"), "got {:?}", styled);
        assert!(body.contains("boom"));
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_theme_colors() {
        let theme = Theme::default();
        assert_eq!(theme.color_for(LogLevel::Error), Color::Red);
        assert_eq!(theme.color_for(LogLevel::Debug), Color::Blue);
        assert_eq!(Theme::dusk().color_for(LogLevel::Info), Color::Cyan);
    }

    #[test]
    fn test_name() {
        assert_eq!(ConsoleSink::new().name(), "console");
    }
}
