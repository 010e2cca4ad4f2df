//! Tests for SHOW and DESCRIBE statements.

mod common;
use common::*;

use sift_sql_core::ast::{DescribeStatement, ShowPattern, ShowStatement, Statement};

fn show(sql: &str) -> ShowStatement {
    match parse(sql) {
        Statement::Show(s) => s,
        other => panic!("Expected SHOW, got {other:?}"),
    }
}

fn describe(sql: &str) -> DescribeStatement {
    match parse(sql) {
        Statement::Describe(d) => d,
        other => panic!("Expected DESCRIBE, got {other:?}"),
    }
}

#[test]
fn show_tables_quoted_pattern() {
    let s = show("SHOW TABLES LIKE 'logs%'");
    assert_eq!(s.table_filter.pattern, ShowPattern::String("logs%".into()));
    round_trip("SHOW TABLES LIKE 'logs%'");
}

#[test]
fn show_tables_unquoted_pattern() {
    let s = show("SHOW TABLES LIKE logs-2020%");
    assert_eq!(
        s.table_filter.pattern,
        ShowPattern::Compatible("logs-2020%".into())
    );
    assert_eq!(s.to_string(), "SHOW TABLES LIKE logs-2020%");
    round_trip("show tables like logs-2020%");
}

#[test]
fn show_tables_dot_prefixed_pattern() {
    let s = show("SHOW TABLES LIKE .kibana*");
    assert_eq!(s.table_filter.pattern.as_str(), ".kibana*");
}

#[test]
fn pattern_stops_at_whitespace() {
    let _ = parse_err("SHOW TABLES LIKE logs %");
}

#[test]
fn show_requires_like() {
    let _ = parse_err("SHOW TABLES");
    let _ = parse_err("SHOW logs");
}

#[test]
fn describe_tables() {
    let d = describe("DESCRIBE TABLES LIKE accounts");
    assert_eq!(d.table_filter.pattern.as_str(), "accounts");
    assert!(d.column_filter.is_none());
    round_trip("DESCRIBE TABLES LIKE accounts");
}

#[test]
fn describe_with_column_filter() {
    let d = describe("DESCRIBE TABLES LIKE 'acc%' COLUMNS LIKE name_%");
    assert_eq!(d.table_filter.pattern, ShowPattern::String("acc%".into()));
    let columns = d.column_filter.expect("COLUMNS filter");
    assert_eq!(columns.pattern, ShowPattern::Compatible("name_%".into()));
    round_trip("DESCRIBE TABLES LIKE 'acc%' COLUMNS LIKE name_%");
}

#[test]
fn admin_statement_spans() {
    let sql = "SHOW TABLES LIKE a;";
    let s = show(sql);
    assert_eq!(s.span.start, 0);
    assert_eq!(&sql[s.span.start..s.span.end], "SHOW TABLES LIKE a");
}
