//! Type names and date/time units.

use core::fmt;

use serde::Serialize;

/// Target type of a `CAST(expr AS type)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    Date,
    Time,
    Timestamp,
    Int,
    Integer,
    Double,
    Long,
    Float,
    String,
    Boolean,
}

impl DataType {
    /// Looks up a cast target by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "TIMESTAMP" => Some(Self::Timestamp),
            "INT" => Some(Self::Int),
            "INTEGER" => Some(Self::Integer),
            "DOUBLE" => Some(Self::Double),
            "LONG" => Some(Self::Long),
            "FLOAT" => Some(Self::Float),
            "STRING" => Some(Self::String),
            "BOOLEAN" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::Double => "DOUBLE",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date/time unit, as used by `INTERVAL`, `EXTRACT` and
/// `TIMESTAMPADD`/`TIMESTAMPDIFF`.
///
/// The compound units (`DAY_HOUR`, `YEAR_MONTH`, ...) are only valid in
/// `INTERVAL` and `EXTRACT`; see [`DatetimePart::is_simple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatetimePart {
    Microsecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    SecondMicrosecond,
    MinuteMicrosecond,
    MinuteSecond,
    HourMicrosecond,
    HourSecond,
    HourMinute,
    DayMicrosecond,
    DaySecond,
    DayMinute,
    DayHour,
    YearMonth,
}

impl DatetimePart {
    /// Looks up a unit by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "MICROSECOND" => Some(Self::Microsecond),
            "SECOND" => Some(Self::Second),
            "MINUTE" => Some(Self::Minute),
            "HOUR" => Some(Self::Hour),
            "DAY" => Some(Self::Day),
            "WEEK" => Some(Self::Week),
            "MONTH" => Some(Self::Month),
            "QUARTER" => Some(Self::Quarter),
            "YEAR" => Some(Self::Year),
            "SECOND_MICROSECOND" => Some(Self::SecondMicrosecond),
            "MINUTE_MICROSECOND" => Some(Self::MinuteMicrosecond),
            "MINUTE_SECOND" => Some(Self::MinuteSecond),
            "HOUR_MICROSECOND" => Some(Self::HourMicrosecond),
            "HOUR_SECOND" => Some(Self::HourSecond),
            "HOUR_MINUTE" => Some(Self::HourMinute),
            "DAY_MICROSECOND" => Some(Self::DayMicrosecond),
            "DAY_SECOND" => Some(Self::DaySecond),
            "DAY_MINUTE" => Some(Self::DayMinute),
            "DAY_HOUR" => Some(Self::DayHour),
            "YEAR_MONTH" => Some(Self::YearMonth),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microsecond => "MICROSECOND",
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Quarter => "QUARTER",
            Self::Year => "YEAR",
            Self::SecondMicrosecond => "SECOND_MICROSECOND",
            Self::MinuteMicrosecond => "MINUTE_MICROSECOND",
            Self::MinuteSecond => "MINUTE_SECOND",
            Self::HourMicrosecond => "HOUR_MICROSECOND",
            Self::HourSecond => "HOUR_SECOND",
            Self::HourMinute => "HOUR_MINUTE",
            Self::DayMicrosecond => "DAY_MICROSECOND",
            Self::DaySecond => "DAY_SECOND",
            Self::DayMinute => "DAY_MINUTE",
            Self::DayHour => "DAY_HOUR",
            Self::YearMonth => "YEAR_MONTH",
        }
    }

    /// Single units, the only ones `TIMESTAMPADD`/`TIMESTAMPDIFF` accept.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Microsecond
                | Self::Second
                | Self::Minute
                | Self::Hour
                | Self::Day
                | Self::Week
                | Self::Month
                | Self::Quarter
                | Self::Year
        )
    }
}

impl fmt::Display for DatetimePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First argument of `GET_FORMAT(type, format)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GetFormatType {
    Date,
    Datetime,
    Time,
    Timestamp,
}

impl GetFormatType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

impl fmt::Display for GetFormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_from_name() {
        assert_eq!(DataType::from_name("int"), Some(DataType::Int));
        assert_eq!(DataType::from_name("Boolean"), Some(DataType::Boolean));
        assert_eq!(DataType::from_name("varchar"), None);
        assert_eq!(DataType::Double.to_string(), "DOUBLE");
    }

    #[test]
    fn test_datetime_part_simple_and_compound() {
        assert_eq!(DatetimePart::from_name("day"), Some(DatetimePart::Day));
        assert_eq!(
            DatetimePart::from_name("DAY_HOUR"),
            Some(DatetimePart::DayHour)
        );
        assert!(DatetimePart::Quarter.is_simple());
        assert!(!DatetimePart::YearMonth.is_simple());
        assert_eq!(DatetimePart::from_name("fortnight"), None);
    }
}
