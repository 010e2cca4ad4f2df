//! Abstract Syntax Tree (AST) types.
//!
//! Every node carries or derives a [`Span`](crate::Span) into the source
//! text, and every node renders back to SQL through [`core::fmt::Display`].
//! The rendering is canonical (uppercase keywords, single spaces, explicit
//! `AS`, `LIMIT n OFFSET m`); parsing the rendering and rendering again
//! gives the same text.

mod expression;
mod function;
mod literal;
mod name;
mod statement;
mod types;

pub use expression::{ComparisonOp, Expression, ExpressionAtom, MathOp, Predicate};
pub use function::{
    AggregateFunction, AggregateName, CaseAlternative, CaseFunction, CastFunction,
    FilterClause, FilteredAggregate, FunctionCall, FunctionKind, HighlightArg,
    HighlightFunction, OverClause, PartitionByClause, PercentileName, RankingFunction,
    RelevanceArg, RelevanceField, RelevanceFunction, RelevanceSyntax, RelevanceTarget,
    RelevanceValue, ScalarCategory, ScalarFunction, ScoreRelevance, TimestampFunction,
    WeightedField, WindowFunction, WindowKind,
};
pub use literal::{Constant, DatetimeConstant, Literal, LiteralKind};
pub use name::{Ident, QualifiedName};
pub use statement::{
    ColumnFilter, DescribeStatement, GroupByClause, HavingClause, LimitClause, NullOrdering,
    OrderByClause, OrderByElement, OrderDirection, Relation, SelectElement, SelectSpec,
    SelectStatement, ShowPattern, ShowStatement, Statement, TableFilter, WhereClause,
};
pub use types::{DataType, DatetimePart, GetFormatType};
