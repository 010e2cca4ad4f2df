//! Tests for the logical, predicate and arithmetic precedence ladders.

mod common;
use common::*;

use sift_sql_core::ast::{ComparisonOp, Expression, ExpressionAtom, MathOp, Predicate};

fn where_condition(sql: &str) -> Expression {
    parse_select(sql)
        .where_clause
        .expect("WHERE clause")
        .condition
}

fn arithmetic(sql: &str) -> ExpressionAtom {
    first_column(sql)
        .as_atom()
        .cloned()
        .unwrap_or_else(|| panic!("expected arithmetic in {sql}"))
}

#[test]
fn and_before_or() {
    let Expression::Or { left, right } = where_condition("SELECT * FROM t WHERE a AND b OR c")
    else {
        panic!("expected OR at the root");
    };
    assert!(matches!(*left, Expression::And { .. }));
    assert!(matches!(*right, Expression::Predicate(Predicate::Atom(_))));
}

#[test]
fn or_then_and_groups_right() {
    let Expression::Or { right, .. } = where_condition("SELECT * FROM t WHERE a OR b AND c")
    else {
        panic!("expected OR at the root");
    };
    assert!(matches!(*right, Expression::And { .. }));
}

#[test]
fn logical_operators_are_left_associative() {
    let Expression::And { left, .. } = where_condition("SELECT * FROM t WHERE a AND b AND c")
    else {
        panic!("expected AND at the root");
    };
    assert!(matches!(*left, Expression::And { .. }));
}

#[test]
fn not_applies_to_predicate() {
    let Expression::Or { left, .. } = where_condition("SELECT * FROM t WHERE NOT a = 1 OR b")
    else {
        panic!("expected OR at the root");
    };
    let Expression::Not { operand, .. } = *left else {
        panic!("expected NOT");
    };
    assert!(matches!(
        *operand,
        Expression::Predicate(Predicate::Comparison { .. })
    ));
}

#[test]
fn multiplication_before_addition() {
    let ExpressionAtom::Math { op, left, right } = arithmetic("SELECT a + b * c") else {
        panic!("expected arithmetic");
    };
    assert_eq!(op, MathOp::Add);
    assert!(matches!(*left, ExpressionAtom::Column(_)));
    assert!(matches!(
        *right,
        ExpressionAtom::Math {
            op: MathOp::Multiply,
            ..
        }
    ));
}

#[test]
fn subtraction_is_left_associative() {
    let ExpressionAtom::Math { op, left, .. } = arithmetic("SELECT a - b - c") else {
        panic!("expected arithmetic");
    };
    assert_eq!(op, MathOp::Subtract);
    assert!(matches!(
        *left,
        ExpressionAtom::Math {
            op: MathOp::Subtract,
            ..
        }
    ));
}

#[test]
fn modulo_spellings() {
    for (sql, expected) in [
        ("SELECT a % 2", MathOp::Modulo),
        ("SELECT a MOD 2", MathOp::Mod),
        ("SELECT a DIV 2", MathOp::Div),
        ("SELECT a / 2", MathOp::Divide),
    ] {
        let ExpressionAtom::Math { op, .. } = arithmetic(sql) else {
            panic!("expected arithmetic in {sql}");
        };
        assert_eq!(op, expected, "{sql}");
        round_trip(sql);
    }
}

#[test]
fn comparison_operators() {
    for (sql, expected) in [
        ("SELECT * FROM t WHERE a = 1", ComparisonOp::Eq),
        ("SELECT * FROM t WHERE a != 1", ComparisonOp::NotEq),
        ("SELECT * FROM t WHERE a <> 1", ComparisonOp::NotEq),
        ("SELECT * FROM t WHERE a < > 1", ComparisonOp::NotEq),
        ("SELECT * FROM t WHERE a <= 1", ComparisonOp::LtEq),
        ("SELECT * FROM t WHERE a < = 1", ComparisonOp::LtEq),
        ("SELECT * FROM t WHERE a >= 1", ComparisonOp::GtEq),
        ("SELECT * FROM t WHERE a > = 1", ComparisonOp::GtEq),
        ("SELECT * FROM t WHERE a > 1", ComparisonOp::Gt),
    ] {
        let Expression::Predicate(Predicate::Comparison { op, .. }) = where_condition(sql) else {
            panic!("expected a comparison in {sql}");
        };
        assert_eq!(op, expected, "{sql}");
    }
}

#[test]
fn not_between_is_one_node() {
    let Expression::Predicate(Predicate::Between { negated, low, high, .. }) =
        where_condition("SELECT * FROM t WHERE x NOT BETWEEN 1 AND 10")
    else {
        panic!("expected BETWEEN");
    };
    assert!(negated);
    assert_eq!(low.to_string(), "1");
    assert_eq!(high.to_string(), "10");
    round_trip("SELECT * FROM t WHERE x NOT BETWEEN 1 AND 10");
}

#[test]
fn like_and_regexp() {
    let Expression::Predicate(Predicate::Like { negated, .. }) =
        where_condition("SELECT * FROM t WHERE name NOT LIKE 'a%'")
    else {
        panic!("expected LIKE");
    };
    assert!(negated);
    assert!(matches!(
        where_condition("SELECT * FROM t WHERE name REGEXP '^a.*'"),
        Expression::Predicate(Predicate::Regexp { negated: false, .. })
    ));
    round_trip("SELECT * FROM t WHERE name NOT LIKE 'a%' AND name NOT REGEXP 'b'");
}

#[test]
fn is_null_forms() {
    assert!(matches!(
        where_condition("SELECT * FROM t WHERE a IS NULL"),
        Expression::Predicate(Predicate::IsNull { negated: false, .. })
    ));
    assert!(matches!(
        where_condition("SELECT * FROM t WHERE a IS NOT NULL"),
        Expression::Predicate(Predicate::IsNull { negated: true, .. })
    ));
    let _ = parse_err("SELECT * FROM t WHERE a IS 1");
}

#[test]
fn in_list() {
    let Expression::Predicate(Predicate::In { list, negated, .. }) =
        where_condition("SELECT * FROM t WHERE a NOT IN (1, 2, a + 1)")
    else {
        panic!("expected IN");
    };
    assert!(negated);
    assert_eq!(list.len(), 3);
    round_trip("SELECT * FROM t WHERE a IN ('x', 'y')");
}

#[test]
fn arithmetic_inside_comparison() {
    let Expression::Predicate(Predicate::Comparison { left, right, .. }) =
        where_condition("SELECT * FROM t WHERE a + 1 > b * 2")
    else {
        panic!("expected a comparison");
    };
    assert!(matches!(
        *left,
        Predicate::Atom(ExpressionAtom::Math { op: MathOp::Add, .. })
    ));
    assert!(matches!(
        *right,
        Predicate::Atom(ExpressionAtom::Math {
            op: MathOp::Multiply,
            ..
        })
    ));
}

#[test]
fn parentheses_override_precedence() {
    let ExpressionAtom::Math { op, left, .. } = arithmetic("SELECT (a + b) * c") else {
        panic!("expected arithmetic");
    };
    assert_eq!(op, MathOp::Multiply);
    assert!(matches!(*left, ExpressionAtom::Parenthesized { .. }));
    round_trip("SELECT (a + b) * c");
}

#[test]
fn four_deep_parentheses() {
    let mut atom = arithmetic("SELECT ((((1))))");
    let mut depth = 0;
    while let ExpressionAtom::Parenthesized { inner, .. } = atom {
        depth += 1;
        atom = inner.as_atom().cloned().expect("atom");
    }
    assert_eq!(depth, 4);
    round_trip("SELECT ((((1))))");
}

#[test]
fn negative_numbers_in_arithmetic() {
    let ExpressionAtom::Math { op, right, .. } = arithmetic("SELECT a - -1") else {
        panic!("expected arithmetic");
    };
    assert_eq!(op, MathOp::Subtract);
    assert_eq!(right.to_string(), "-1");
    round_trip("SELECT a - -1");
}
