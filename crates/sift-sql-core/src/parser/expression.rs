//! Expression parsing: logical, predicate and arithmetic layers.
//!
//! Each layer is a precedence-climbing loop over its own operator table in
//! [`super::pratt`]. Right operands are parsed one level tighter than the
//! operator, which makes every binary operator left-associative.

use super::error::ParseError;
use super::parser::{Parser, EXPRESSION_LEVEL};
use super::pratt::{
    logical_operator, math_operator, predicate_operator, LogicalOp, PredicateOp, NOT_PRECEDENCE,
};
use super::resolver::AtomStart;
use crate::ast::{Expression, ExpressionAtom, Predicate};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a full expression.
    pub(super) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_expression_bp(0)
    }

    /// Parses an expression whose binary operators bind at least as tightly
    /// as `min`. Every call counts as one level of nesting.
    fn parse_expression_bp(&mut self, min: u8) -> Result<Expression, ParseError> {
        self.enter(EXPRESSION_LEVEL)?;
        let result = self.parse_logical(min);
        self.leave(EXPRESSION_LEVEL);
        result
    }

    fn parse_logical(&mut self, min: u8) -> Result<Expression, ParseError> {
        let mut lhs = if self.check_keyword(Keyword::Not) {
            let start = self.advance();
            let operand = self.parse_expression_bp(NOT_PRECEDENCE)?;
            Expression::Not {
                operand: Box::new(operand),
                span: self.span_from(start),
            }
        } else {
            Expression::Predicate(self.parse_predicate(0)?)
        };

        while let Some(op) = logical_operator(self.current()) {
            let precedence = op.precedence();
            if precedence < min {
                break;
            }
            self.advance();
            let rhs = self.parse_expression_bp(precedence + 1)?;
            lhs = match op {
                LogicalOp::And => Expression::And {
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
                LogicalOp::Or => Expression::Or {
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
            };
        }
        Ok(lhs)
    }

    fn parse_predicate(&mut self, min: u8) -> Result<Predicate, ParseError> {
        let mut lhs = Predicate::Atom(self.parse_expression_atom(0)?);

        while let Some((op, width)) = predicate_operator(&self.tokens) {
            let precedence = op.precedence();
            if precedence < min {
                break;
            }
            if matches!(op, PredicateOp::In { .. }) && self.in_disabled_at == Some(self.depth) {
                break;
            }
            for _ in 0..width {
                self.advance();
            }

            lhs = match op {
                PredicateOp::Comparison(op) => {
                    let rhs = self.parse_predicate(precedence + 1)?;
                    Predicate::Comparison {
                        op,
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                    }
                }
                PredicateOp::IsNull { negated } => {
                    let end = self.expect_keyword(Keyword::Null)?;
                    let span = lhs.span().merge(end);
                    Predicate::IsNull {
                        target: Box::new(lhs),
                        negated,
                        span,
                    }
                }
                PredicateOp::Between { negated } => {
                    let low = self.parse_predicate(precedence + 1)?;
                    self.expect_keyword(Keyword::And)?;
                    let high = self.parse_predicate(precedence + 1)?;
                    Predicate::Between {
                        target: Box::new(lhs),
                        negated,
                        low: Box::new(low),
                        high: Box::new(high),
                    }
                }
                PredicateOp::Like { negated } => {
                    let pattern = self.parse_predicate(precedence + 1)?;
                    Predicate::Like {
                        left: Box::new(lhs),
                        negated,
                        pattern: Box::new(pattern),
                    }
                }
                PredicateOp::Regexp { negated } => {
                    let pattern = self.parse_predicate(precedence + 1)?;
                    Predicate::Regexp {
                        left: Box::new(lhs),
                        negated,
                        pattern: Box::new(pattern),
                    }
                }
                PredicateOp::In { negated } => {
                    self.expect(&TokenKind::LeftParen, "'('")?;
                    let list = self.parse_comma_separated("IN list item", Self::parse_expression)?;
                    self.expect(&TokenKind::RightParen, "')'")?;
                    let span = self.span_from(lhs.span());
                    Predicate::In {
                        target: Box::new(lhs),
                        negated,
                        list,
                        span,
                    }
                }
            };
        }
        Ok(lhs)
    }

    /// Parses arithmetic over atoms.
    pub(super) fn parse_expression_atom(&mut self, min: u8) -> Result<ExpressionAtom, ParseError> {
        let mut lhs = self.parse_primary_atom()?;
        while let Some(op) = math_operator(self.current()) {
            let precedence = op.precedence();
            if precedence < min {
                break;
            }
            self.advance();
            let rhs = self.parse_expression_atom(precedence + 1)?;
            lhs = ExpressionAtom::Math {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_primary_atom(&mut self) -> Result<ExpressionAtom, ParseError> {
        if self.at_alternate_relevance() {
            return Ok(ExpressionAtom::Function(self.parse_alternate_relevance()?));
        }

        match self.resolve_atom() {
            Some(AtomStart::Parenthesized) => self.parse_parenthesized(),
            Some(AtomStart::Constant) => Ok(ExpressionAtom::Constant(self.parse_constant()?)),
            Some(AtomStart::Function) => Ok(ExpressionAtom::Function(self.parse_function_call()?)),
            Some(AtomStart::Column) => Ok(ExpressionAtom::Column(self.parse_qualified_name()?)),
            None => Err(ParseError::no_viable_alternative(
                "expression",
                &["constant", "column name", "function call", "'('"],
                self.current(),
            )),
        }
    }

    fn parse_parenthesized(&mut self) -> Result<ExpressionAtom, ParseError> {
        let start = self.expect(&TokenKind::LeftParen, "'('")?;
        let inner = self.parse_expression()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(ExpressionAtom::Parenthesized {
            inner: Box::new(inner),
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ComparisonOp, Expression, ExpressionAtom, MathOp, Predicate};
    use crate::config::ParserConfig;
    use crate::parser::{ParseErrorKind, Parser};

    fn expr(sql: &str) -> Expression {
        let mut parser = Parser::new(sql);
        let expression = parser.parse_expression().unwrap();
        assert!(parser.current().is_eof(), "trailing input in {sql}");
        expression
    }

    fn atom(sql: &str) -> ExpressionAtom {
        expr(sql).as_atom().cloned().unwrap()
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let e = expr("a AND b OR c");
        let Expression::Or { left, .. } = e else {
            panic!("expected OR at the root");
        };
        assert!(matches!(*left, Expression::And { .. }));
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        let e = expr("NOT a AND b");
        let Expression::And { left, .. } = e else {
            panic!("expected AND at the root");
        };
        assert!(matches!(*left, Expression::Not { .. }));
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let ExpressionAtom::Math { op, right, .. } = atom("a + b * c") else {
            panic!("expected arithmetic");
        };
        assert_eq!(op, MathOp::Add);
        assert!(matches!(
            *right,
            ExpressionAtom::Math {
                op: MathOp::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let ExpressionAtom::Math { op, left, .. } = atom("a - b - c") else {
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
    fn test_div_and_mod_words() {
        let ExpressionAtom::Math { op, .. } = atom("a DIV 2") else {
            panic!("expected arithmetic");
        };
        assert_eq!(op, MathOp::Div);
        assert!(matches!(
            atom("a mod b"),
            ExpressionAtom::Math { op: MathOp::Mod, .. }
        ));
    }

    #[test]
    fn test_not_between_is_single_predicate() {
        let Expression::Predicate(Predicate::Between { negated, .. }) =
            expr("x NOT BETWEEN 1 AND 10")
        else {
            panic!("expected BETWEEN");
        };
        assert!(negated);
    }

    #[test]
    fn test_between_inside_and() {
        let e = expr("x BETWEEN 1 AND 10 AND y = 2");
        let Expression::And { left, right } = e else {
            panic!("expected AND at the root");
        };
        assert!(matches!(*left, Expression::Predicate(Predicate::Between { .. })));
        assert!(matches!(
            *right,
            Expression::Predicate(Predicate::Comparison {
                op: ComparisonOp::Eq,
                ..
            })
        ));
    }

    #[test]
    fn test_comparison_over_is_null() {
        let Expression::Predicate(Predicate::IsNull { target, negated, .. }) =
            expr("a = b IS NOT NULL")
        else {
            panic!("expected IS NULL at the root");
        };
        assert!(negated);
        assert!(matches!(*target, Predicate::Comparison { .. }));
    }

    #[test]
    fn test_in_list() {
        let Expression::Predicate(Predicate::In { list, negated, .. }) =
            expr("a NOT IN (1, 2, 3)")
        else {
            panic!("expected IN");
        };
        assert!(negated);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_parenthesized_chain() {
        let mut current = atom("((((1))))");
        let mut depth = 0;
        while let ExpressionAtom::Parenthesized { inner, .. } = current {
            depth += 1;
            current = inner.as_atom().cloned().unwrap();
        }
        assert_eq!(depth, 4);
        assert!(matches!(current, ExpressionAtom::Constant(_)));
    }

    #[test]
    fn test_depth_is_restored_after_errors() {
        let mut parser = Parser::new("(a +");
        assert!(parser.parse_expression().is_err());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_nesting_limit() {
        let sql = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        let config = ParserConfig::default().with_max_depth(5);
        let mut parser = Parser::with_config(&sql, config);
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::RecursionLimitExceeded);
    }

    #[test]
    fn test_missing_operand() {
        let mut parser = Parser::new("a AND");
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::NoViableAlternative);
    }
}
