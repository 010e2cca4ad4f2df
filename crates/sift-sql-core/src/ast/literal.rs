//! Constants: numbers, strings, booleans, date/time values and intervals.

use core::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::{DatetimePart, Expression};
use crate::lexer::Span;

/// A literal value with its source span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constant {
    pub value: Literal,
    pub span: Span,
}

impl Constant {
    #[must_use]
    pub const fn new(value: Literal, span: Span) -> Self {
        Self { value, span }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// String literal, unescaped.
    String(String),
    /// Integer literal, sign applied.
    Decimal(i64),
    /// Real literal, sign applied.
    Real(f64),
    Boolean(bool),
    Null,
    /// `DATE '2020-01-01'` or `{d '2020-01-01'}`.
    Date(NaiveDate),
    /// `TIME '10:20:30'` or `{t '10:20:30'}`.
    Time(NaiveTime),
    /// `TIMESTAMP '2020-01-01 10:20:30'` or `{ts '...'}`.
    Timestamp(NaiveDateTime),
    /// `INTERVAL expr unit`.
    Interval {
        value: Box<Expression>,
        unit: DatetimePart,
    },
    /// `CURRENT_DATE`, `NOW`-style constants; `parens` records a trailing
    /// `()`.
    DatetimeConstant {
        name: DatetimeConstant,
        parens: bool,
    },
    /// A literal whose text did not convert to a value. The parse carries a
    /// diagnostic alongside it.
    Malformed {
        kind: LiteralKind,
        /// The offending text (the digits, or the quoted date/time text).
        text: String,
        reason: String,
    },
}

/// Which kind of literal a [`Literal::Malformed`] was meant to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    Decimal,
    Real,
    Date,
    Time,
    Timestamp,
}

impl LiteralKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "integer",
            Self::Real => "real",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
        }
    }
}

/// Bare-word date/time constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatetimeConstant {
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    Localtime,
    Localtimestamp,
    UtcTimestamp,
    UtcDate,
    UtcTime,
}

impl DatetimeConstant {
    /// Looks up a constant by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "CURRENT_DATE" => Some(Self::CurrentDate),
            "CURRENT_TIME" => Some(Self::CurrentTime),
            "CURRENT_TIMESTAMP" => Some(Self::CurrentTimestamp),
            "LOCALTIME" => Some(Self::Localtime),
            "LOCALTIMESTAMP" => Some(Self::Localtimestamp),
            "UTC_TIMESTAMP" => Some(Self::UtcTimestamp),
            "UTC_DATE" => Some(Self::UtcDate),
            "UTC_TIME" => Some(Self::UtcTime),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::Localtime => "LOCALTIME",
            Self::Localtimestamp => "LOCALTIMESTAMP",
            Self::UtcTimestamp => "UTC_TIMESTAMP",
            Self::UtcDate => "UTC_DATE",
            Self::UtcTime => "UTC_TIME",
        }
    }
}

/// Writes `value` as a single-quoted SQL string.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("''")?,
            '\\' => f.write_str("\\\\")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}

/// Formats a real so that it lexes back as a real (never as an integer).
fn write_real(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let magnitude = value.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        write!(f, "{value:e}")
    } else if value.fract() == 0.0 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_quoted(f, s),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Real(n) => write_real(f, *n),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
            Self::Date(d) => write!(f, "DATE '{d}'"),
            Self::Time(t) => write!(f, "TIME '{t}'"),
            Self::Timestamp(ts) => write!(f, "TIMESTAMP '{ts}'"),
            Self::Interval { value, unit } => write!(f, "INTERVAL {value} {unit}"),
            Self::DatetimeConstant { name, parens } => {
                f.write_str(name.as_str())?;
                if *parens {
                    f.write_str("()")?;
                }
                Ok(())
            }
            Self::Malformed { kind, text, .. } => match kind {
                LiteralKind::Decimal | LiteralKind::Real => f.write_str(text),
                LiteralKind::Date => {
                    f.write_str("DATE ")?;
                    write_quoted(f, text)
                }
                LiteralKind::Time => {
                    f.write_str("TIME ")?;
                    write_quoted(f, text)
                }
                LiteralKind::Timestamp => {
                    f.write_str("TIMESTAMP ")?;
                    write_quoted(f, text)
                }
            },
        }
    }
}
