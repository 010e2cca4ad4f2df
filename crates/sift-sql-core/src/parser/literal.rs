//! Constant parsing and literal value conversion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{Constant, DatetimeConstant, DatetimePart, Literal, LiteralKind};
use crate::lexer::{Keyword, Span, TokenKind};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone, Copy)]
enum Temporal {
    Date,
    Time,
    Timestamp,
}

impl Temporal {
    const fn kind(self) -> LiteralKind {
        match self {
            Self::Date => LiteralKind::Date,
            Self::Time => LiteralKind::Time,
            Self::Timestamp => LiteralKind::Timestamp,
        }
    }
}

impl Parser {
    /// Parses a constant.
    ///
    /// Literals whose text does not convert are kept as
    /// [`Literal::Malformed`] with a diagnostic, unless the parse is
    /// strict.
    pub(super) fn parse_constant(&mut self) -> Result<Constant, ParseError> {
        let start = self.current().span;
        let value = match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Literal::String(value)
            }
            TokenKind::Plus | TokenKind::Minus | TokenKind::Decimal | TokenKind::Real => {
                return self.parse_numeric_constant();
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Literal::Boolean(true)
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Literal::Boolean(false)
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Literal::Null
            }
            TokenKind::Keyword(Keyword::Date) => self.parse_typed_literal(Temporal::Date)?,
            TokenKind::Keyword(Keyword::Time) => self.parse_typed_literal(Temporal::Time)?,
            TokenKind::Keyword(Keyword::Timestamp) => {
                self.parse_typed_literal(Temporal::Timestamp)?
            }
            TokenKind::LeftBrace => self.parse_odbc_literal()?,
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval()?,
            TokenKind::Identifier(name) => match DatetimeConstant::from_name(name) {
                Some(name) => {
                    self.advance();
                    let parens = self.check(&TokenKind::LeftParen);
                    if parens {
                        self.advance();
                        self.expect(&TokenKind::RightParen, "')'")?;
                    }
                    Literal::DatetimeConstant { name, parens }
                }
                None => return Err(ParseError::unexpected("constant", self.current())),
            },
            _ => return Err(ParseError::unexpected("constant", self.current())),
        };
        Ok(Constant::new(value, self.span_from(start)))
    }

    /// Parses an optionally signed number. The sign is part of the literal.
    pub(super) fn parse_numeric_constant(&mut self) -> Result<Constant, ParseError> {
        let start = self.current().span;
        let negative = match self.current().kind {
            TokenKind::Minus => {
                self.advance();
                true
            }
            TokenKind::Plus => {
                self.advance();
                false
            }
            _ => false,
        };

        let token = self.current();
        let kind = match token.kind {
            TokenKind::Decimal => LiteralKind::Decimal,
            TokenKind::Real => LiteralKind::Real,
            _ => return Err(ParseError::unexpected("number", token)),
        };
        let text = if negative {
            format!("-{}", token.text)
        } else {
            token.text.clone()
        };
        self.advance();
        let span = self.span_from(start);

        let value = match kind {
            LiteralKind::Decimal => match text.parse::<i64>() {
                Ok(n) => Literal::Decimal(n),
                Err(e) => self.malformed_value(kind, text, &e.to_string(), span)?,
            },
            _ => match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Literal::Real(n),
                Ok(_) => self.malformed_value(kind, text, "value out of range", span)?,
                Err(e) => self.malformed_value(kind, text, &e.to_string(), span)?,
            },
        };
        Ok(Constant::new(value, span))
    }

    /// `DATE '2020-01-01'`, `TIME '..'`, `TIMESTAMP '..'`
    fn parse_typed_literal(&mut self, temporal: Temporal) -> Result<Literal, ParseError> {
        let start = self.advance();
        let (text, _) = self.expect_string()?;
        let span = self.span_from(start);
        self.temporal_value(temporal, text, span)
    }

    /// `{d '..'}`, `{t '..'}`, `{ts '..'}`, or the same with a type keyword.
    fn parse_odbc_literal(&mut self) -> Result<Literal, ParseError> {
        let start = self.expect(&TokenKind::LeftBrace, "'{'")?;
        let token = self.current();
        let temporal = match &token.kind {
            TokenKind::Keyword(Keyword::Date) => Temporal::Date,
            TokenKind::Keyword(Keyword::Time) => Temporal::Time,
            TokenKind::Keyword(Keyword::Timestamp) => Temporal::Timestamp,
            TokenKind::Identifier(_) if token.is_word("d") => Temporal::Date,
            TokenKind::Identifier(_) if token.is_word("t") => Temporal::Time,
            TokenKind::Identifier(_) if token.is_word("ts") => Temporal::Timestamp,
            _ => return Err(ParseError::unexpected("d, t or ts", token)),
        };
        self.advance();
        let (text, _) = self.expect_string()?;
        self.expect(&TokenKind::RightBrace, "'}'")?;
        let span = self.span_from(start);
        self.temporal_value(temporal, text, span)
    }

    /// `INTERVAL expr unit`
    fn parse_interval(&mut self) -> Result<Literal, ParseError> {
        self.expect_keyword(Keyword::Interval)?;
        let value = self.parse_expression()?;
        let unit = self.parse_datetime_part()?;
        Ok(Literal::Interval {
            value: Box::new(value),
            unit,
        })
    }

    /// A date/time unit such as `DAY` or `HOUR_MINUTE`.
    pub(super) fn parse_datetime_part(&mut self) -> Result<DatetimePart, ParseError> {
        match self
            .current()
            .bare_word()
            .and_then(|word| DatetimePart::from_name(&word))
        {
            Some(part) => {
                self.advance();
                Ok(part)
            }
            None => Err(ParseError::unexpected("date/time unit", self.current())),
        }
    }

    fn temporal_value(
        &mut self,
        temporal: Temporal,
        text: String,
        span: Span,
    ) -> Result<Literal, ParseError> {
        let parsed = match temporal {
            Temporal::Date => NaiveDate::parse_from_str(&text, DATE_FORMAT).map(Literal::Date),
            Temporal::Time => NaiveTime::parse_from_str(&text, TIME_FORMAT).map(Literal::Time),
            Temporal::Timestamp => {
                NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT).map(Literal::Timestamp)
            }
        };
        match parsed {
            Ok(value) => Ok(value),
            Err(e) => self.malformed_value(temporal.kind(), text, &e.to_string(), span),
        }
    }

    fn malformed_value(
        &mut self,
        kind: LiteralKind,
        text: String,
        reason: &str,
        span: Span,
    ) -> Result<Literal, ParseError> {
        self.report_malformed(ParseError::malformed_literal(kind.as_str(), reason, span))?;
        Ok(Literal::Malformed {
            kind,
            text,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::ast::{Constant, DatetimeConstant, DatetimePart, Literal, LiteralKind};
    use crate::config::ParserConfig;
    use crate::lexer::Span;
    use crate::parser::{ParseErrorKind, Parser};

    fn constant(sql: &str) -> (Constant, Parser) {
        let mut parser = Parser::new(sql);
        let constant = parser.parse_constant().unwrap();
        (constant, parser)
    }

    fn value(sql: &str) -> Literal {
        constant(sql).0.value
    }

    #[test]
    fn test_signed_numbers() {
        let (c, _) = constant("- 42");
        assert_eq!(c.value, Literal::Decimal(-42));
        assert_eq!(c.span, Span::new(0, 4));
        assert_eq!(value("+1.5"), Literal::Real(1.5));
        assert_eq!(value("-9223372036854775808"), Literal::Decimal(i64::MIN));
    }

    #[test]
    fn test_integer_overflow_is_malformed() {
        let (c, parser) = constant("99999999999999999999");
        assert!(matches!(
            c.value,
            Literal::Malformed {
                kind: LiteralKind::Decimal,
                ..
            }
        ));
        assert_eq!(parser.diagnostics.len(), 1);
        assert_eq!(parser.diagnostics[0].kind, ParseErrorKind::MalformedLiteral);
    }

    #[test]
    fn test_malformed_is_an_error_when_strict() {
        let mut parser = Parser::with_config("DATE '2020-02-30'", ParserConfig::strict());
        let error = parser.parse_constant().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::MalformedLiteral);
    }

    #[test]
    fn test_typed_temporal_literals() {
        assert_eq!(
            value("DATE '2020-01-31'"),
            Literal::Date(NaiveDate::from_ymd_opt(2020, 1, 31).unwrap())
        );
        assert_eq!(
            value("TIME '10:20:30.5'"),
            Literal::Time(NaiveTime::from_hms_milli_opt(10, 20, 30, 500).unwrap())
        );
        assert!(matches!(
            value("TIMESTAMP '2020-01-31 10:20:30'"),
            Literal::Timestamp(_)
        ));
    }

    #[test]
    fn test_invalid_calendar_date() {
        let Literal::Malformed { kind, text, .. } = value("DATE '2020-02-30'") else {
            panic!("expected a malformed literal");
        };
        assert_eq!(kind, LiteralKind::Date);
        assert_eq!(text, "2020-02-30");
    }

    #[test]
    fn test_odbc_escapes() {
        assert!(matches!(value("{d '2020-01-31'}"), Literal::Date(_)));
        assert!(matches!(value("{ts '2020-01-31 00:00:00'}"), Literal::Timestamp(_)));
        assert!(matches!(value("{TIME '01:02:03'}"), Literal::Time(_)));
    }

    #[test]
    fn test_interval() {
        let Literal::Interval { value: amount, unit } = value("INTERVAL 5 DAY") else {
            panic!("expected an interval");
        };
        assert_eq!(unit, DatetimePart::Day);
        assert_eq!(amount.to_string(), "5");
    }

    #[test]
    fn test_datetime_constants() {
        assert_eq!(
            value("current_date"),
            Literal::DatetimeConstant {
                name: DatetimeConstant::CurrentDate,
                parens: false
            }
        );
        assert_eq!(
            value("UTC_TIMESTAMP()"),
            Literal::DatetimeConstant {
                name: DatetimeConstant::UtcTimestamp,
                parens: true
            }
        );
        assert!(Parser::new("today").parse_constant().is_err());
    }
}
