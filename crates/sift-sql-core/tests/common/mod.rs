#![allow(dead_code)]

use sift_sql_core::ast::{Expression, SelectElement, SelectStatement, Statement};
use sift_sql_core::{ParseError, ParseOutcome, Parser};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// Runs the recovering parse.
pub fn parse_recovering(sql: &str) -> ParseOutcome {
    Parser::new(sql).parse()
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// The expression of the first select element.
pub fn first_column(sql: &str) -> Expression {
    let select = parse_select(sql);
    match select.columns.into_iter().next() {
        Some(SelectElement::Expression { expr, .. }) => expr,
        other => panic!("Expected an expression column, got {other:?}"),
    }
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
