//! Expression AST: the logical, predicate and arithmetic layers.
//!
//! The three layers mirror the three precedence ladders of the grammar.
//! An [`Expression`] combines predicates with `NOT`/`AND`/`OR`, a
//! [`Predicate`] compares or tests arithmetic atoms, and an
//! [`ExpressionAtom`] is a constant, column, function call, parenthesized
//! expression or arithmetic on atoms.

use core::fmt;

use serde::Serialize;

use super::{Constant, FunctionCall, QualifiedName};
use crate::lexer::Span;

/// Logical layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// `NOT expr`
    Not {
        operand: Box<Expression>,
        span: Span,
    },
    /// `left AND right`
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `left OR right`
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Predicate(Predicate),
}

impl Expression {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Not { span, .. } => *span,
            Self::And { left, right } | Self::Or { left, right } => left.span().merge(right.span()),
            Self::Predicate(p) => p.span(),
        }
    }

    /// The arithmetic atom this expression consists of, if it is nothing
    /// more than that.
    #[must_use]
    pub const fn as_atom(&self) -> Option<&ExpressionAtom> {
        match self {
            Self::Predicate(Predicate::Atom(atom)) => Some(atom),
            _ => None,
        }
    }
}

impl From<ExpressionAtom> for Expression {
    fn from(atom: ExpressionAtom) -> Self {
        Self::Predicate(Predicate::Atom(atom))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not { operand, .. } => write!(f, "NOT {operand}"),
            Self::And { left, right } => write!(f, "{left} AND {right}"),
            Self::Or { left, right } => write!(f, "{left} OR {right}"),
            Self::Predicate(p) => write!(f, "{p}"),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// Predicate layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Predicate {
    /// `left op right`
    Comparison {
        op: ComparisonOp,
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    /// `target IS [NOT] NULL`
    IsNull {
        target: Box<Predicate>,
        negated: bool,
        span: Span,
    },
    /// `target [NOT] BETWEEN low AND high`
    Between {
        target: Box<Predicate>,
        negated: bool,
        low: Box<Predicate>,
        high: Box<Predicate>,
    },
    /// `left [NOT] LIKE pattern`
    Like {
        left: Box<Predicate>,
        negated: bool,
        pattern: Box<Predicate>,
    },
    /// `left [NOT] REGEXP pattern`
    Regexp {
        left: Box<Predicate>,
        negated: bool,
        pattern: Box<Predicate>,
    },
    /// `target [NOT] IN (expr, ...)`
    In {
        target: Box<Predicate>,
        negated: bool,
        list: Vec<Expression>,
        span: Span,
    },
    Atom(ExpressionAtom),
}

impl Predicate {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Comparison { left, right, .. } => left.span().merge(right.span()),
            Self::IsNull { span, .. } | Self::In { span, .. } => *span,
            Self::Between { target, high, .. } => target.span().merge(high.span()),
            Self::Like { left, pattern, .. } | Self::Regexp { left, pattern, .. } => {
                left.span().merge(pattern.span())
            }
            Self::Atom(atom) => atom.span(),
        }
    }
}

const fn not_prefix(negated: bool) -> &'static str {
    if negated {
        "NOT "
    } else {
        ""
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison { op, left, right } => {
                write!(f, "{left} {} {right}", op.as_str())
            }
            Self::IsNull {
                target, negated, ..
            } => write!(f, "{target} IS {}NULL", not_prefix(*negated)),
            Self::Between {
                target,
                negated,
                low,
                high,
            } => write!(
                f,
                "{target} {}BETWEEN {low} AND {high}",
                not_prefix(*negated)
            ),
            Self::Like {
                left,
                negated,
                pattern,
            } => write!(f, "{left} {}LIKE {pattern}", not_prefix(*negated)),
            Self::Regexp {
                left,
                negated,
                pattern,
            } => write!(f, "{left} {}REGEXP {pattern}", not_prefix(*negated)),
            Self::In {
                target,
                negated,
                list,
                ..
            } => {
                write!(f, "{target} {}IN (", not_prefix(*negated))?;
                write_list(f, list)?;
                f.write_str(")")
            }
            Self::Atom(atom) => write!(f, "{atom}"),
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// Integer division (`DIV`).
    Div,
    /// `MOD` written as an infix word.
    Mod,
}

impl MathOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Div => "DIV",
            Self::Mod => "MOD",
        }
    }
}

/// Arithmetic layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExpressionAtom {
    Constant(Constant),
    Column(QualifiedName),
    Function(Box<FunctionCall>),
    /// `( expression )`
    Parenthesized {
        inner: Box<Expression>,
        span: Span,
    },
    /// `left op right`
    Math {
        op: MathOp,
        left: Box<ExpressionAtom>,
        right: Box<ExpressionAtom>,
    },
}

impl ExpressionAtom {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Constant(c) => c.span,
            Self::Column(name) => name.span,
            Self::Function(call) => call.span,
            Self::Parenthesized { span, .. } => *span,
            Self::Math { left, right, .. } => left.span().merge(right.span()),
        }
    }
}

impl fmt::Display for ExpressionAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::Column(name) => write!(f, "{name}"),
            Self::Function(call) => write!(f, "{call}"),
            Self::Parenthesized { inner, .. } => write!(f, "({inner})"),
            Self::Math { op, left, right } => write!(f, "{left} {} {right}", op.as_str()),
        }
    }
}

/// Writes items separated by `, `.
pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    fn int(n: i64, start: usize) -> ExpressionAtom {
        let width = n.to_string().len();
        ExpressionAtom::Constant(Constant::new(
            Literal::Decimal(n),
            Span::new(start, start + width),
        ))
    }

    #[test]
    fn test_math_span_covers_both_operands() {
        let math = ExpressionAtom::Math {
            op: MathOp::Add,
            left: Box::new(int(1, 0)),
            right: Box::new(int(22, 4)),
        };
        assert_eq!(math.span(), Span::new(0, 6));
        assert_eq!(math.to_string(), "1 + 22");
    }

    #[test]
    fn test_negated_predicates_display() {
        let between = Predicate::Between {
            target: Box::new(Predicate::Atom(int(5, 0))),
            negated: true,
            low: Box::new(Predicate::Atom(int(1, 14))),
            high: Box::new(Predicate::Atom(int(9, 20))),
        };
        assert_eq!(between.to_string(), "5 NOT BETWEEN 1 AND 9");
        assert_eq!(between.span(), Span::new(0, 21));
    }

    #[test]
    fn test_as_atom() {
        let expr = Expression::from(int(1, 0));
        assert!(expr.as_atom().is_some());
        let not = Expression::Not {
            operand: Box::new(expr),
            span: Span::new(0, 5),
        };
        assert!(not.as_atom().is_none());
    }
}
