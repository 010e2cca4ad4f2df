//! Tests for constants: numbers, strings, booleans, temporal literals,
//! intervals and date/time constants.

mod common;
use common::*;

use chrono::NaiveDate;
use sift_sql_core::ast::{
    Constant, DatetimeConstant, DatetimePart, ExpressionAtom, Literal, LiteralKind,
};
use sift_sql_core::{ParseErrorKind, ParserConfig};

fn constant(sql: &str) -> Constant {
    match first_column(sql).as_atom() {
        Some(ExpressionAtom::Constant(c)) => c.clone(),
        other => panic!("expected a constant in {sql}, got {other:?}"),
    }
}

fn literal(sql: &str) -> Literal {
    constant(sql).value
}

#[test]
fn numbers() {
    assert_eq!(literal("SELECT 42"), Literal::Decimal(42));
    assert_eq!(literal("SELECT -7"), Literal::Decimal(-7));
    assert_eq!(literal("SELECT 3.25"), Literal::Real(3.25));
    assert_eq!(literal("SELECT 1e3"), Literal::Real(1000.0));
    round_trip("SELECT 42, -7, 3.25, 2.0, 1e3 FROM t");
}

#[test]
fn real_without_leading_digits() {
    assert_eq!(literal("SELECT .5 FROM t"), Literal::Real(0.5));
    let select = parse_select("SELECT .5, a.b FROM t WHERE x > .25");
    assert_eq!(select.columns.len(), 2);
    assert_eq!(select.to_string(), "SELECT 0.5, a.b FROM t WHERE x > 0.25");
}

#[test]
fn strings_and_escapes() {
    assert_eq!(literal("SELECT 'abc'"), Literal::String("abc".into()));
    assert_eq!(literal("SELECT 'it''s'"), Literal::String("it's".into()));
    assert_eq!(literal(r"SELECT 'it\'s'"), Literal::String("it's".into()));
    assert_eq!(literal("SELECT \"double\""), Literal::String("double".into()));
    round_trip(r"SELECT 'it''s', 'a\\b', 'x' FROM t");
}

#[test]
fn booleans_and_null() {
    assert_eq!(literal("SELECT TRUE"), Literal::Boolean(true));
    assert_eq!(literal("SELECT false"), Literal::Boolean(false));
    assert_eq!(literal("SELECT NULL"), Literal::Null);
}

#[test]
fn typed_temporal_literals() {
    assert_eq!(
        literal("SELECT DATE '2021-03-04'"),
        Literal::Date(NaiveDate::from_ymd_opt(2021, 3, 4).unwrap())
    );
    assert!(matches!(literal("SELECT TIME '23:59:59'"), Literal::Time(_)));
    assert!(matches!(
        literal("SELECT TIMESTAMP '2021-03-04 05:06:07.123'"),
        Literal::Timestamp(_)
    ));
    round_trip("SELECT DATE '2021-03-04', TIME '23:59:59', TIMESTAMP '2021-03-04 05:06:07' FROM t");
}

#[test]
fn odbc_escapes() {
    assert!(matches!(literal("SELECT {d '2021-03-04'}"), Literal::Date(_)));
    assert!(matches!(literal("SELECT {t '05:06:07'}"), Literal::Time(_)));
    assert!(matches!(
        literal("SELECT {ts '2021-03-04 05:06:07'}"),
        Literal::Timestamp(_)
    ));
    assert!(matches!(
        literal("SELECT {TIMESTAMP '2021-03-04 05:06:07'}"),
        Literal::Timestamp(_)
    ));
}

#[test]
fn literal_span_covers_prefix() {
    let sql = "SELECT DATE '2021-03-04'";
    let c = constant(sql);
    assert_eq!(&sql[c.span.start..c.span.end], "DATE '2021-03-04'");
}

#[test]
fn intervals() {
    let Literal::Interval { value, unit } = literal("SELECT INTERVAL 2 HOUR") else {
        panic!("expected an interval");
    };
    assert_eq!(unit, DatetimePart::Hour);
    assert_eq!(value.to_string(), "2");

    let Literal::Interval { unit, .. } = literal("SELECT INTERVAL a + 1 DAY_MINUTE") else {
        panic!("expected an interval");
    };
    assert_eq!(unit, DatetimePart::DayMinute);
    round_trip("SELECT * FROM t WHERE ts > NOW() - INTERVAL 1 DAY");
    let _ = parse_err("SELECT INTERVAL 1 FORTNIGHT");
}

#[test]
fn datetime_constants() {
    assert_eq!(
        literal("SELECT CURRENT_TIMESTAMP"),
        Literal::DatetimeConstant {
            name: DatetimeConstant::CurrentTimestamp,
            parens: false
        }
    );
    assert_eq!(
        literal("SELECT localtime()"),
        Literal::DatetimeConstant {
            name: DatetimeConstant::Localtime,
            parens: true
        }
    );
    round_trip("SELECT CURRENT_DATE, UTC_TIME() FROM t");
}

#[test]
fn malformed_literals_are_recovered() {
    let outcome = parse_recovering("SELECT DATE '2021-13-01', 99999999999999999999 FROM t");
    assert!(!outcome.aborted);
    assert_eq!(outcome.diagnostics.len(), 2);
    assert!(outcome
        .diagnostics
        .iter()
        .all(|d| d.kind == ParseErrorKind::MalformedLiteral));

    let statement = outcome.statement.expect("statement");
    assert_eq!(
        statement.to_string(),
        "SELECT DATE '2021-13-01', 99999999999999999999 FROM t"
    );
    let sift_sql_core::Statement::Select(select) = statement else {
        panic!("expected SELECT");
    };
    assert!(select.from.is_some());
}

#[test]
fn malformed_literal_kind_is_kept() {
    let outcome = parse_recovering("SELECT TIME '25:00:00'");
    let Some(sift_sql_core::Statement::Select(select)) = outcome.statement else {
        panic!("expected SELECT");
    };
    let sift_sql_core::ast::SelectElement::Expression { expr, .. } = &select.columns[0] else {
        panic!("expected an expression column");
    };
    assert!(matches!(
        expr.as_atom(),
        Some(ExpressionAtom::Constant(Constant {
            value: Literal::Malformed {
                kind: LiteralKind::Time,
                ..
            },
            ..
        }))
    ));
}

#[test]
fn malformed_literal_fails_strict_parse() {
    let error = parse_err("SELECT DATE '2021-02-29'");
    assert_eq!(error.kind, ParseErrorKind::MalformedLiteral);

    let outcome = sift_sql_core::Parser::with_config("SELECT 1e999", ParserConfig::strict()).parse();
    assert!(outcome.aborted);
    assert_eq!(outcome.diagnostics[0].kind, ParseErrorKind::MalformedLiteral);
}
