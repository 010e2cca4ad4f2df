//! Operator tables for the three precedence ladders.
//!
//! Higher precedence binds tighter. Every binary operator is
//! left-associative: the parser parses right operands at `precedence + 1`.

use crate::ast::{ComparisonOp, MathOp};
use crate::lexer::{Keyword, Token, TokenKind, TokenStream};

/// Binding power of prefix `NOT`; tighter than `AND` and `OR`.
pub const NOT_PRECEDENCE: u8 = 3;

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::And => 2,
            Self::Or => 1,
        }
    }
}

/// Returns the logical operator at the current token, if any.
#[must_use]
pub const fn logical_operator(token: &Token) -> Option<LogicalOp> {
    match token.kind {
        TokenKind::Keyword(Keyword::And) => Some(LogicalOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(LogicalOp::Or),
        _ => None,
    }
}

/// Predicate operators, including their optional `NOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOp {
    Comparison(ComparisonOp),
    IsNull { negated: bool },
    Between { negated: bool },
    Like { negated: bool },
    Regexp { negated: bool },
    In { negated: bool },
}

impl PredicateOp {
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Comparison(_) => 6,
            Self::IsNull { .. } => 5,
            Self::Between { .. } => 4,
            Self::Like { .. } => 3,
            Self::Regexp { .. } => 2,
            Self::In { .. } => 1,
        }
    }
}

/// Looks for a predicate operator at the cursor.
///
/// Returns the operator and how many tokens it spans. Comparisons may be
/// written with the two characters split (`< =`, `> =`, `< >`). For
/// `IS [NOT]` the trailing `NULL` is left for the parser to require. `IN`
/// only counts as an operator when a `(` follows it.
#[must_use]
pub fn predicate_operator(tokens: &TokenStream) -> Option<(PredicateOp, usize)> {
    let first = tokens.peek(0);
    let next = &tokens.peek(1).kind;
    let comparison = |op: ComparisonOp| Some((PredicateOp::Comparison(op), 1_usize));
    match &first.kind {
        TokenKind::Eq => comparison(ComparisonOp::Eq),
        TokenKind::NotEq => comparison(ComparisonOp::NotEq),
        TokenKind::LtEq => comparison(ComparisonOp::LtEq),
        TokenKind::GtEq => comparison(ComparisonOp::GtEq),
        TokenKind::Lt => match next {
            TokenKind::Eq => Some((PredicateOp::Comparison(ComparisonOp::LtEq), 2)),
            TokenKind::Gt => Some((PredicateOp::Comparison(ComparisonOp::NotEq), 2)),
            _ => comparison(ComparisonOp::Lt),
        },
        TokenKind::Gt => match next {
            TokenKind::Eq => Some((PredicateOp::Comparison(ComparisonOp::GtEq), 2)),
            _ => comparison(ComparisonOp::Gt),
        },
        TokenKind::Keyword(Keyword::Is) => {
            let negated = matches!(next, TokenKind::Keyword(Keyword::Not));
            Some((PredicateOp::IsNull { negated }, if negated { 2 } else { 1 }))
        }
        TokenKind::Keyword(Keyword::Not) => {
            negatable_operator(tokens, 1, true).map(|op| (op, 2))
        }
        TokenKind::Keyword(_) => negatable_operator(tokens, 0, false).map(|op| (op, 1)),
        _ => None,
    }
}

fn negatable_operator(tokens: &TokenStream, k: usize, negated: bool) -> Option<PredicateOp> {
    match tokens.peek(k).as_keyword()? {
        Keyword::Between => Some(PredicateOp::Between { negated }),
        Keyword::Like => Some(PredicateOp::Like { negated }),
        Keyword::Regexp => Some(PredicateOp::Regexp { negated }),
        Keyword::In if matches!(tokens.peek(k + 1).kind, TokenKind::LeftParen) => {
            Some(PredicateOp::In { negated })
        }
        _ => None,
    }
}

impl MathOp {
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Multiply | Self::Divide | Self::Modulo | Self::Div | Self::Mod => 2,
            Self::Add | Self::Subtract => 1,
        }
    }
}

/// Converts a token to an arithmetic operator. `DIV` and `MOD` are plain
/// identifiers everywhere except in operator position.
#[must_use]
pub fn math_operator(token: &Token) -> Option<MathOp> {
    match &token.kind {
        TokenKind::Plus => Some(MathOp::Add),
        TokenKind::Minus => Some(MathOp::Subtract),
        TokenKind::Star => Some(MathOp::Multiply),
        TokenKind::Slash => Some(MathOp::Divide),
        TokenKind::Percent => Some(MathOp::Modulo),
        TokenKind::Identifier(_) if token.is_word("DIV") => Some(MathOp::Div),
        TokenKind::Identifier(_) if token.is_word("MOD") => Some(MathOp::Mod),
        _ => None,
    }
}
