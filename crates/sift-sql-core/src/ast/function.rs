//! Function call AST.
//!
//! Every call site in the grammar resolves to exactly one [`FunctionKind`]
//! shape; the shape decides which arguments are legal.

use core::fmt;

use serde::Serialize;

use super::expression::write_list;
use super::literal::write_quoted;
use super::{
    Constant, DataType, DatetimePart, Expression, GetFormatType, OrderByClause, QualifiedName,
};
use crate::lexer::Span;

/// A function call with its span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCall {
    pub kind: FunctionKind,
    pub span: Span,
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// The shape of a function call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FunctionKind {
    /// `nested(path.*)`
    NestedAll { name: String, path: QualifiedName },
    Scalar(ScalarFunction),
    Case(CaseFunction),
    Cast(CastFunction),
    Window(WindowFunction),
    Aggregate(AggregateFunction),
    FilteredAggregate(FilteredAggregate),
    ScoreRelevance(ScoreRelevance),
    Relevance(RelevanceFunction),
    Highlight(HighlightFunction),
    /// `POSITION(substring IN string)`
    Position {
        substring: Box<Expression>,
        string: Box<Expression>,
    },
    /// `EXTRACT(part FROM arg)`
    Extract {
        part: DatetimePart,
        arg: Box<Expression>,
    },
    /// `GET_FORMAT(type, format)`
    GetFormat {
        format_type: GetFormatType,
        format: Box<Expression>,
    },
    /// `TIMESTAMPADD(part, a, b)` / `TIMESTAMPDIFF(part, a, b)`
    Timestamp {
        function: TimestampFunction,
        part: DatetimePart,
        first: Box<Expression>,
        second: Box<Expression>,
    },
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NestedAll { name, path } => write!(f, "{name}({path}.*)"),
            Self::Scalar(call) => write!(f, "{call}"),
            Self::Case(call) => write!(f, "{call}"),
            Self::Cast(call) => write!(f, "{call}"),
            Self::Window(call) => write!(f, "{call}"),
            Self::Aggregate(call) => write!(f, "{call}"),
            Self::FilteredAggregate(call) => write!(f, "{call}"),
            Self::ScoreRelevance(call) => write!(f, "{call}"),
            Self::Relevance(call) => write!(f, "{call}"),
            Self::Highlight(call) => write!(f, "{call}"),
            Self::Position { substring, string } => {
                write!(f, "POSITION({substring} IN {string})")
            }
            Self::Extract { part, arg } => write!(f, "EXTRACT({part} FROM {arg})"),
            Self::GetFormat {
                format_type,
                format,
            } => write!(f, "GET_FORMAT({format_type}, {format})"),
            Self::Timestamp {
                function,
                part,
                first,
                second,
            } => write!(f, "{}({part}, {first}, {second})", function.as_str()),
        }
    }
}

/// Category a scalar function name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarCategory {
    Mathematical,
    Trigonometric,
    Arithmetic,
    DateTime,
    Text,
    FlowControl,
    System,
    Nested,
}

/// `name(arg, ...)` for a known scalar function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarFunction {
    /// The name as written.
    pub name: String,
    pub category: ScalarCategory,
    pub args: Vec<Expression>,
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.args)?;
        f.write_str(")")
    }
}

/// `CASE [operand] WHEN .. THEN .. [ELSE ..] END`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseFunction {
    /// Present for the simple form; absent for the searched form.
    pub operand: Option<Box<Expression>>,
    pub alternatives: Vec<CaseAlternative>,
    pub else_result: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseAlternative {
    pub condition: Expression,
    pub result: Expression,
}

impl fmt::Display for CaseFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        for alternative in &self.alternatives {
            write!(
                f,
                " WHEN {} THEN {}",
                alternative.condition, alternative.result
            )?;
        }
        if let Some(result) = &self.else_result {
            write!(f, " ELSE {result}")?;
        }
        f.write_str(" END")
    }
}

/// `CAST(expr AS type)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastFunction {
    pub expr: Box<Expression>,
    pub data_type: DataType,
}

impl fmt::Display for CastFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAST({} AS {})", self.expr, self.data_type)
    }
}

/// Ranking functions, only valid with an `OVER` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RankingFunction {
    RowNumber,
    Rank,
    DenseRank,
}

impl RankingFunction {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "ROW_NUMBER" => Some(Self::RowNumber),
            "RANK" => Some(Self::Rank),
            "DENSE_RANK" => Some(Self::DenseRank),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RowNumber => "ROW_NUMBER",
            Self::Rank => "RANK",
            Self::DenseRank => "DENSE_RANK",
        }
    }
}

/// The function part of a windowed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WindowKind {
    Ranking {
        function: RankingFunction,
        args: Vec<Expression>,
    },
    Aggregate(AggregateFunction),
}

/// `function OVER (...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowFunction {
    pub function: WindowKind,
    pub over: OverClause,
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            WindowKind::Ranking { function, args } => {
                write!(f, "{}(", function.as_str())?;
                write_list(f, args)?;
                f.write_str(")")?;
            }
            WindowKind::Aggregate(aggregate) => write!(f, "{aggregate}")?,
        }
        write!(f, " {}", self.over)
    }
}

/// `OVER ([PARTITION BY ...] [ORDER BY ...])`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverClause {
    pub partition_by: Option<PartitionByClause>,
    pub order_by: Option<OrderByClause>,
    pub span: Span,
}

impl fmt::Display for OverClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OVER (")?;
        if let Some(partition) = &self.partition_by {
            write!(f, "{partition}")?;
            if self.order_by.is_some() {
                f.write_str(" ")?;
            }
        }
        if let Some(order) = &self.order_by {
            write!(f, "{order}")?;
        }
        f.write_str(")")
    }
}

/// `PARTITION BY expr, ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionByClause {
    pub expressions: Vec<Expression>,
    pub span: Span,
}

impl fmt::Display for PartitionByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PARTITION BY ")?;
        write_list(f, &self.expressions)
    }
}

/// Aggregate function names taking a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AggregateName {
    Avg,
    Count,
    Sum,
    Min,
    Max,
    VarPop,
    VarSamp,
    Variance,
    Std,
    Stddev,
    StddevPop,
    StddevSamp,
}

impl AggregateName {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "AVG" => Some(Self::Avg),
            "COUNT" => Some(Self::Count),
            "SUM" => Some(Self::Sum),
            "MIN" => Some(Self::Min),
            "MAX" => Some(Self::Max),
            "VAR_POP" => Some(Self::VarPop),
            "VAR_SAMP" => Some(Self::VarSamp),
            "VARIANCE" => Some(Self::Variance),
            "STD" => Some(Self::Std),
            "STDDEV" => Some(Self::Stddev),
            "STDDEV_POP" => Some(Self::StddevPop),
            "STDDEV_SAMP" => Some(Self::StddevSamp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::VarPop => "VAR_POP",
            Self::VarSamp => "VAR_SAMP",
            Self::Variance => "VARIANCE",
            Self::Std => "STD",
            Self::Stddev => "STDDEV",
            Self::StddevPop => "STDDEV_POP",
            Self::StddevSamp => "STDDEV_SAMP",
        }
    }
}

/// `PERCENTILE` or `PERCENTILE_APPROX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PercentileName {
    Percentile,
    PercentileApprox,
}

impl PercentileName {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "PERCENTILE" => Some(Self::Percentile),
            "PERCENTILE_APPROX" => Some(Self::PercentileApprox),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentile => "PERCENTILE",
            Self::PercentileApprox => "PERCENTILE_APPROX",
        }
    }
}

/// Aggregate calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AggregateFunction {
    /// `AVG(x)`, `COUNT(x)`, ...
    Regular {
        function: AggregateName,
        arg: Box<Expression>,
    },
    /// `COUNT(*)`
    CountStar,
    /// `COUNT(DISTINCT x, ...)`
    CountDistinct { args: Vec<Expression> },
    /// `PERCENTILE_APPROX(field, percent [, compression])`
    Percentile {
        function: PercentileName,
        field: Box<Expression>,
        percent: Constant,
        compression: Option<Constant>,
    },
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular { function, arg } => write!(f, "{}({arg})", function.as_str()),
            Self::CountStar => f.write_str("COUNT(*)"),
            Self::CountDistinct { args } => {
                f.write_str("COUNT(DISTINCT ")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::Percentile {
                function,
                field,
                percent,
                compression,
            } => {
                write!(f, "{}({field}, {percent}", function.as_str())?;
                if let Some(compression) = compression {
                    write!(f, ", {compression}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// `aggregate [ORDER BY ...] FILTER (WHERE condition)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredAggregate {
    pub aggregate: AggregateFunction,
    pub order_by: Option<OrderByClause>,
    pub filter: FilterClause,
}

impl fmt::Display for FilteredAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aggregate)?;
        if let Some(order) = &self.order_by {
            write!(f, " {order}")?;
        }
        write!(f, " {}", self.filter)
    }
}

/// `FILTER (WHERE condition)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    pub condition: Box<Expression>,
    pub span: Span,
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FILTER(WHERE {})", self.condition)
    }
}

/// `SCORE(relevance_call [, weight])`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRelevance {
    /// The name as written (`SCORE`, `SCOREQUERY`, `SCORE_QUERY`).
    pub name: String,
    pub relevance: RelevanceFunction,
    pub weight: Option<f64>,
}

impl fmt::Display for ScoreRelevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.name, self.relevance)?;
        if let Some(weight) = self.weight {
            write!(f, ", {weight}")?;
        }
        f.write_str(")")
    }
}

/// Which surface form a relevance call was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelevanceSyntax {
    /// `match(field, 'query', ...)`
    Standard,
    /// `field = match_query('query', ...)`
    FieldEquals,
    /// `multi_match(query = 'q', fields = 'f', ...)`
    NamedArguments,
}

/// The field a relevance function searches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RelevanceField {
    Name(QualifiedName),
    /// A quoted field name, which may contain wildcards.
    Quoted { value: String, span: Span },
}

impl fmt::Display for RelevanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Quoted { value, .. } => write_quoted(f, value),
        }
    }
}

/// A field with an optional boost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedField {
    pub field: RelevanceField,
    pub weight: Option<f64>,
}

impl fmt::Display for WeightedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(weight) = self.weight {
            write!(f, " ^ {weight}")?;
        }
        Ok(())
    }
}

/// Value of a relevance query or option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RelevanceValue {
    Name(QualifiedName),
    Constant(Constant),
}

impl fmt::Display for RelevanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Constant(c) => write!(f, "{c}"),
        }
    }
}

/// `name = value` option of a relevance function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevanceArg {
    /// The option name as written, without quotes.
    pub name: String,
    /// Whether the name was written as a string literal.
    pub quoted_name: bool,
    pub value: RelevanceValue,
}

impl fmt::Display for RelevanceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted_name {
            write_quoted(f, &self.name)?;
        } else {
            f.write_str(&self.name)?;
        }
        write!(f, " = {}", self.value)
    }
}

/// What a relevance function searches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RelevanceTarget {
    /// `query('text', ...)`
    NoField,
    SingleField(RelevanceField),
    MultiField(Vec<WeightedField>),
}

/// A full-text relevance search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevanceFunction {
    /// The name as written.
    pub name: String,
    pub syntax: RelevanceSyntax,
    pub target: RelevanceTarget,
    pub query: RelevanceValue,
    pub args: Vec<RelevanceArg>,
}

impl RelevanceFunction {
    fn write_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for RelevanceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.syntax, &self.target) {
            (RelevanceSyntax::FieldEquals, RelevanceTarget::SingleField(field)) => {
                write!(f, "{field} = {}({}", self.name, self.query)?;
            }
            (RelevanceSyntax::FieldEquals, RelevanceTarget::MultiField(fields)) => {
                if let Some(first) = fields.first() {
                    write!(f, "{} = ", first.field)?;
                }
                write!(f, "{}({}", self.name, self.query)?;
            }
            (RelevanceSyntax::NamedArguments, RelevanceTarget::MultiField(fields)) => {
                write!(f, "{}(query = {}, fields = ", self.name, self.query)?;
                match fields.as_slice() {
                    [single] => write!(f, "{single}")?,
                    many => {
                        f.write_str("[")?;
                        write_list(f, many)?;
                        f.write_str("]")?;
                    }
                }
            }
            (_, RelevanceTarget::NoField) => write!(f, "{}({}", self.name, self.query)?,
            (_, RelevanceTarget::SingleField(field)) => {
                write!(f, "{}({field}, {}", self.name, self.query)?;
            }
            (_, RelevanceTarget::MultiField(fields)) => {
                write!(f, "{}([", self.name)?;
                write_list(f, fields)?;
                write!(f, "], {}", self.query)?;
            }
        }
        self.write_args(f)
    }
}

/// `name = 'value'` option of `HIGHLIGHT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightArg {
    pub name: String,
    pub value: String,
}

/// `HIGHLIGHT(field, option = 'value', ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightFunction {
    pub field: RelevanceField,
    pub args: Vec<HighlightArg>,
}

impl fmt::Display for HighlightFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HIGHLIGHT({}", self.field)?;
        for arg in &self.args {
            write!(f, ", {} = ", arg.name)?;
            write_quoted(f, &arg.value)?;
        }
        f.write_str(")")
    }
}

/// `TIMESTAMPADD` or `TIMESTAMPDIFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimestampFunction {
    Add,
    Diff,
}

impl TimestampFunction {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "TIMESTAMPADD" => Some(Self::Add),
            "TIMESTAMPDIFF" => Some(Self::Diff),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "TIMESTAMPADD",
            Self::Diff => "TIMESTAMPDIFF",
        }
    }
}
