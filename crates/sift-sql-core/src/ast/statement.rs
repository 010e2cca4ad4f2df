//! Statement AST types.

use core::fmt;

use serde::Serialize;

use super::expression::write_list;
use super::literal::write_quoted;
use super::{Expression, Ident, QualifiedName};
use crate::lexer::Span;

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Select(SelectStatement),
    Show(ShowStatement),
    Describe(DescribeStatement),
}

impl Statement {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Select(s) => s.span,
            Self::Show(s) => s.span,
            Self::Describe(s) => s.span,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Show(s) => write!(f, "{s}"),
            Self::Describe(s) => write!(f, "{s}"),
        }
    }
}

/// `ALL` or `DISTINCT` after `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SelectSpec {
    All,
    Distinct,
}

impl SelectSpec {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Distinct => "DISTINCT",
        }
    }
}

/// A SELECT statement.
///
/// `WHERE`, `GROUP BY`, `HAVING` and `ORDER BY` only occur together with
/// `FROM`; `LIMIT` may appear without it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    pub spec: Option<SelectSpec>,
    pub columns: Vec<SelectElement>,
    pub from: Option<Relation>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<HavingClause>,
    pub order_by: Option<OrderByClause>,
    pub limit: Option<LimitClause>,
    pub span: Span,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if let Some(spec) = self.spec {
            write!(f, "{} ", spec.as_str())?;
        }
        write_list(f, &self.columns)?;
        if let Some(from) = &self.from {
            write!(f, " FROM {from}")?;
        }
        if let Some(clause) = &self.where_clause {
            write!(f, " WHERE {}", clause.condition)?;
        }
        if let Some(clause) = &self.group_by {
            f.write_str(" GROUP BY ")?;
            write_list(f, &clause.expressions)?;
        }
        if let Some(clause) = &self.having {
            write!(f, " HAVING {}", clause.condition)?;
        }
        if let Some(clause) = &self.order_by {
            write!(f, " {clause}")?;
        }
        if let Some(clause) = &self.limit {
            write!(f, " {clause}")?;
        }
        Ok(())
    }
}

/// An item of the select list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectElement {
    /// `*`
    Star { span: Span },
    /// `expr [AS alias]`
    Expression {
        expr: Expression,
        alias: Option<Ident>,
    },
}

impl fmt::Display for SelectElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Star { .. } => f.write_str("*"),
            Self::Expression { expr, alias } => {
                write!(f, "{expr}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
        }
    }
}

/// The single relation of a FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Relation {
    /// An index or table name.
    Table {
        name: QualifiedName,
        alias: Option<Ident>,
    },
    /// `( SELECT ... ) [AS] alias`
    Subquery {
        query: Box<SelectStatement>,
        alias: Ident,
        span: Span,
    },
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::Subquery { query, alias, .. } => write!(f, "({query}) AS {alias}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhereClause {
    pub condition: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupByClause {
    pub expressions: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HavingClause {
    pub condition: Expression,
    pub span: Span,
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NullOrdering {
    First,
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// `ORDER BY item, ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderByClause {
    pub elements: Vec<OrderByElement>,
    pub span: Span,
}

impl fmt::Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ORDER BY ")?;
        write_list(f, &self.elements)
    }
}

/// An ORDER BY entry. Direction and null ordering are kept only when
/// written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderByElement {
    pub expr: Expression,
    pub direction: Option<OrderDirection>,
    pub nulls: Option<NullOrdering>,
}

impl fmt::Display for OrderByElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

/// `LIMIT n [OFFSET m]`, also written `LIMIT m, n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitClause {
    pub limit: u64,
    pub offset: Option<u64>,
    pub span: Span,
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.limit)?;
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

/// A `LIKE` pattern of `SHOW`/`DESCRIBE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ShowPattern {
    /// A quoted pattern.
    String(String),
    /// An unquoted pattern such as `logs%`, kept verbatim.
    Compatible(String),
}

impl ShowPattern {
    /// The pattern text, without quotes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) | Self::Compatible(s) => s,
        }
    }
}

impl fmt::Display for ShowPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_quoted(f, s),
            Self::Compatible(s) => f.write_str(s),
        }
    }
}

/// `TABLES LIKE pattern`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFilter {
    pub pattern: ShowPattern,
    pub span: Span,
}

/// `COLUMNS LIKE pattern`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFilter {
    pub pattern: ShowPattern,
    pub span: Span,
}

/// `SHOW TABLES LIKE pattern`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowStatement {
    pub table_filter: TableFilter,
    pub span: Span,
}

impl fmt::Display for ShowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHOW TABLES LIKE {}", self.table_filter.pattern)
    }
}

/// `DESCRIBE TABLES LIKE pattern [COLUMNS LIKE pattern]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeStatement {
    pub table_filter: TableFilter,
    pub column_filter: Option<ColumnFilter>,
    pub span: Span,
}

impl fmt::Display for DescribeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DESCRIBE TABLES LIKE {}", self.table_filter.pattern)?;
        if let Some(columns) = &self.column_filter {
            write!(f, " COLUMNS LIKE {}", columns.pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_display_is_canonical() {
        let limit = LimitClause {
            limit: 20,
            offset: Some(10),
            span: Span::default(),
        };
        assert_eq!(limit.to_string(), "LIMIT 20 OFFSET 10");
    }

    #[test]
    fn test_describe_display() {
        let stmt = DescribeStatement {
            table_filter: TableFilter {
                pattern: ShowPattern::Compatible(String::from("logs%")),
                span: Span::default(),
            },
            column_filter: Some(ColumnFilter {
                pattern: ShowPattern::String(String::from("host%")),
                span: Span::default(),
            }),
            span: Span::default(),
        };
        assert_eq!(
            stmt.to_string(),
            "DESCRIBE TABLES LIKE logs% COLUMNS LIKE 'host%'"
        );
    }
}
