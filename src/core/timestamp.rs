//! Timestamp formatting utilities
//!
//! Log templates describe dates with Unicode-style patterns such as
//! `yyyy-MM-dd HH:mm:ss.SSS`. A [`DatePattern`] compiles such a pattern once,
//! at component construction, into chrono strftime fields. Rendering only
//! reads the compiled form, so a pattern can be shared by any number of
//! threads.

use super::error::{LoggerError, Result};
use chrono::{DateTime, FixedOffset, Local, Timelike};
use std::fmt::{self, Write as _};

/// Pattern used by the `default` and `detailed` presets
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd HH:mm:ss.SSS";

/// Current local time, as captured for every emitted log call
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    /// A single strftime field understood by chrono
    Field(&'static str),
    /// Fractional seconds truncated to N digits (1..=9)
    Fraction(usize),
}

/// A compiled date pattern.
///
/// # Examples
///
/// ```
/// use rust_template_logger::core::DatePattern;
/// use chrono::{FixedOffset, TimeZone};
///
/// let pattern = DatePattern::new("yyyy-MM-dd HH:mm:ss.SSS").unwrap();
/// let at = FixedOffset::east_opt(0)
///     .unwrap()
///     .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
///     .unwrap();
/// assert_eq!(pattern.format(&at), "2025-01-08 10:30:45.000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    tokens: Vec<Token>,
}

impl DatePattern {
    /// Compile `pattern`.
    ///
    /// Letters are pattern fields and must be one of the supported ones;
    /// text inside single quotes is copied verbatim (`''` is a literal quote);
    /// every other character is a literal.
    pub fn new(pattern: &str) -> Result<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    literal.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                let mut closed = false;
                while i < chars.len() {
                    if chars[i] == '\'' {
                        if chars.get(i + 1) == Some(&'\'') {
                            literal.push('\'');
                            i += 2;
                            continue;
                        }
                        closed = true;
                        i += 1;
                        break;
                    }
                    literal.push(chars[i]);
                    i += 1;
                }
                if !closed {
                    return Err(LoggerError::date_pattern(pattern, "unterminated quote"));
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                i += 1;
                continue;
            }

            let mut run = 1;
            while chars.get(i + run) == Some(&c) {
                run += 1;
            }
            i += run;

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Self::field(pattern, c, run)?);
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    fn field(pattern: &str, letter: char, run: usize) -> Result<Token> {
        let spec = match (letter, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M' | 'L', 1) => "%-m",
            ('M' | 'L', 2) => "%m",
            ('M' | 'L', 3) => "%b",
            ('M' | 'L', _) => "%B",
            ('d', 1) => "%-d",
            ('d', 2) => "%d",
            ('D', 1) => "%-j",
            ('D', _) => "%j",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('H', 1) => "%-H",
            ('H', 2) => "%H",
            ('h', 1) => "%-I",
            ('h', 2) => "%I",
            ('m', 1) => "%-M",
            ('m', 2) => "%M",
            ('s', 1) => "%-S",
            ('s', 2) => "%S",
            ('S', 1..=9) => return Ok(Token::Fraction(run)),
            ('a', _) => "%p",
            ('Z', 1..=3) | ('X', 1..=2) => "%z",
            ('Z', 5) | ('X', 3) => "%:z",
            _ => {
                return Err(LoggerError::date_pattern(
                    pattern,
                    format!("unsupported field '{}'", letter.to_string().repeat(run)),
                ))
            }
        };
        Ok(Token::Field(spec))
    }

    /// The pattern text this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render `timestamp` according to this pattern
    #[must_use]
    pub fn format(&self, timestamp: &DateTime<FixedOffset>) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);
        if self.write_to(&mut out, timestamp).is_err() {
            // chrono only fails on malformed specs, and every spec above is fixed
            out.clear();
            out.push_str(&timestamp.to_rfc3339());
        }
        out
    }

    fn write_to(&self, out: &mut String, timestamp: &DateTime<FixedOffset>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(spec) => write!(out, "{}", timestamp.format(spec))?,
                Token::Fraction(digits) => {
                    // leap seconds report nanos >= 1e9
                    let nanos = timestamp.nanosecond() % 1_000_000_000;
                    let full = format!("{:09}", nanos);
                    out.push_str(&full[..*digits]);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<FixedOffset> {
        // 2025-01-08 10:30:45.123456 +02:00
        FixedOffset::east_opt(2 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_default_pattern() {
        let pattern = DatePattern::new(DEFAULT_DATE_PATTERN).unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "2025-01-08 10:30:45.123");
    }

    #[test]
    fn test_fraction_digits() {
        let at = fixed_datetime();
        assert_eq!(DatePattern::new("S").unwrap().format(&at), "1");
        assert_eq!(DatePattern::new("SS").unwrap().format(&at), "12");
        assert_eq!(DatePattern::new("SSSSSS").unwrap().format(&at), "123456");
    }

    #[test]
    fn test_unpadded_and_text_fields() {
        let pattern = DatePattern::new("EEE, d MMM yy h:m:s a").unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "Wed, 8 Jan 25 10:30:45 AM");

        let pattern = DatePattern::new("EEEE d MMMM yyyy").unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "Wednesday 8 January 2025");
    }

    #[test]
    fn test_zone_fields() {
        let at = fixed_datetime();
        assert_eq!(DatePattern::new("Z").unwrap().format(&at), "+0200");
        assert_eq!(DatePattern::new("ZZZZZ").unwrap().format(&at), "+02:00");
        assert_eq!(DatePattern::new("XXX").unwrap().format(&at), "+02:00");
    }

    #[test]
    fn test_quoted_literals() {
        let pattern = DatePattern::new("yyyy-MM-dd'T'HH:mm").unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "2025-01-08T10:30");

        let pattern = DatePattern::new("'day' d, 'o''clock' H").unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "day 8, o'clock 10");

        let pattern = DatePattern::new("HH''mm").unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "10'30");
    }

    #[test]
    fn test_percent_is_literal() {
        let pattern = DatePattern::new("100% HH").unwrap();
        assert_eq!(pattern.format(&fixed_datetime()), "100% 10");
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            DatePattern::new("yyyy QQ"),
            Err(LoggerError::InvalidDatePattern { .. })
        ));
        assert!(DatePattern::new("HHH").is_err());
        assert!(DatePattern::new("'open").is_err());
    }

    #[test]
    fn test_as_str_round_trips_source() {
        let pattern = DatePattern::new(DEFAULT_DATE_PATTERN).unwrap();
        assert_eq!(pattern.as_str(), DEFAULT_DATE_PATTERN);
        assert_eq!(pattern.to_string(), DEFAULT_DATE_PATTERN);
    }
}
