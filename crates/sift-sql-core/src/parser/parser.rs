//! Parser state, entry points, error recovery and statement rules.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::error::{ErrorListener, ParseError};
use crate::ast::{
    ColumnFilter, DescribeStatement, GroupByClause, HavingClause, Ident, LimitClause,
    NullOrdering, OrderByClause, OrderByElement, OrderDirection, QualifiedName, Relation,
    SelectElement, SelectSpec, SelectStatement, ShowPattern, ShowStatement, Statement,
    TableFilter, WhereClause,
};
use crate::config::{ParserConfig, MAX_DEPTH_CEILING};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind, TokenStream};

/// Depth units charged for a parenthesized or operand expression.
pub(super) const EXPRESSION_LEVEL: usize = 1;

/// Depth units charged for a function call, on top of its arguments.
pub(super) const CALL_LEVEL: usize = 1;

/// Depth units charged for a subquery.
pub(super) const SUBQUERY_LEVEL: usize = 2;

/// Result of a recovering parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    /// The statement, possibly with clauses missing where errors were
    /// recovered from. `None` for empty input or when the parse aborted.
    pub statement: Option<Statement>,
    /// Diagnostics in the order they were reported.
    pub diagnostics: Vec<ParseError>,
    /// Whether a fatal error ended the parse early.
    pub aborted: bool,
}

impl ParseOutcome {
    /// True when the input parsed without any diagnostic.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && !self.aborted
    }

    /// Hands every diagnostic to `listener`, in order.
    pub fn report(&self, listener: &mut dyn ErrorListener) {
        for error in &self.diagnostics {
            listener.syntax_error(error);
        }
    }
}

/// SQL parser.
///
/// Owns its token stream, diagnostics and nesting counter; one parser
/// parses one statement.
pub struct Parser {
    pub(super) tokens: TokenStream,
    pub(super) config: ParserConfig,
    pub(super) diagnostics: Vec<ParseError>,
    /// Current expression nesting.
    pub(super) depth: usize,
    /// Number of active speculative sub-parses.
    pub(super) speculating: usize,
    /// Nesting of `FROM ( SELECT ... )`.
    pub(super) subquery_depth: usize,
    /// Depth at which `IN` is not taken as a predicate operator.
    pub(super) in_disabled_at: Option<usize>,
    /// Source offset of the last reported diagnostic.
    last_error_at: Option<usize>,
}

impl Parser {
    /// Creates a parser for `input` with the default configuration.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(input: &str, config: ParserConfig) -> Self {
        Self::from_tokens(Lexer::new(input).tokenize(), config)
    }

    /// Creates a parser over tokens from any producer.
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self {
            tokens: TokenStream::new(tokens),
            config,
            diagnostics: Vec::new(),
            depth: 0,
            speculating: 0,
            subquery_depth: 0,
            in_disabled_at: None,
            last_error_at: None,
        }
    }

    /// Parses the input, recovering from errors when the configuration
    /// allows it.
    #[must_use]
    pub fn parse(mut self) -> ParseOutcome {
        match self.parse_root() {
            Ok(statement) => ParseOutcome {
                statement,
                diagnostics: self.diagnostics,
                aborted: false,
            },
            Err(error) => {
                warn!(kind = %error.kind, span = %error.span, "parse aborted: {}", error.message);
                self.diagnostics.push(error);
                ParseOutcome {
                    statement: None,
                    diagnostics: self.diagnostics,
                    aborted: true,
                }
            }
        }
    }

    /// Parses a single SQL statement, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement.
    pub fn parse_statement(mut self) -> Result<Statement, ParseError> {
        self.config.recover = false;
        match self.parse_root()? {
            Some(statement) => Ok(statement),
            None => Err(ParseError::unexpected("statement", self.current())),
        }
    }

    fn parse_root(&mut self) -> Result<Option<Statement>, ParseError> {
        let statement = if matches!(
            self.current().kind,
            TokenKind::Eof | TokenKind::Semicolon
        ) {
            None
        } else {
            let result = self.parse_sql_statement();
            self.recover(result)?
        };
        self.eat(&TokenKind::Semicolon);
        if !self.current().is_eof() {
            let error = ParseError::unexpected("end of input", self.current());
            if !self.recovering() {
                return Err(error);
            }
            self.report(error)?;
            while !self.current().is_eof() {
                self.tokens.advance();
            }
            debug!("skipped trailing input");
        }
        Ok(statement)
    }

    fn parse_sql_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Select) => Ok(Statement::Select(self.parse_query()?)),
            Some(Keyword::Show) => Ok(Statement::Show(self.parse_show()?)),
            Some(Keyword::Describe) => Ok(Statement::Describe(self.parse_describe()?)),
            _ => Err(ParseError::no_viable_alternative(
                "statement",
                &["SELECT", "SHOW", "DESCRIBE"],
                self.current(),
            )),
        }
    }

    // ---- token helpers ------------------------------------------------

    pub(super) fn current(&self) -> &Token {
        self.tokens.peek(0)
    }

    pub(super) fn peek(&self, k: usize) -> &Token {
        self.tokens.peek(k)
    }

    /// Consumes the current token and returns its span.
    pub(super) fn advance(&mut self) -> Span {
        self.tokens.advance().span
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Consumes the current token if it matches `kind`.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(what, self.current()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(keyword.as_str(), self.current()))
        }
    }

    /// Expects a string literal and returns its value.
    pub(super) fn expect_string(&mut self) -> Result<(String, Span), ParseError> {
        match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                Ok((value, self.advance()))
            }
            _ => Err(ParseError::unexpected("string literal", self.current())),
        }
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        start.merge(self.tokens.previous_span())
    }

    /// Parses `item (',' item)*`. Each item must consume input.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        rule: &str,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            let before = self.tokens.position();
            items.push(item(self)?);
            if self.tokens.position() == before {
                return Err(ParseError::internal_ambiguity(rule, self.current().span));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    // ---- nesting, speculation and recovery ----------------------------

    /// Enters one level of nesting worth `cost` depth units.
    ///
    /// Plain expressions cost [`EXPRESSION_LEVEL`]. Function calls and
    /// subqueries hold larger frames and are charged [`CALL_LEVEL`] and
    /// [`SUBQUERY_LEVEL`]. A configured limit above [`MAX_DEPTH_CEILING`]
    /// is clamped to it.
    pub(super) fn enter(&mut self, cost: usize) -> Result<(), ParseError> {
        let limit = self.config.max_depth.min(MAX_DEPTH_CEILING);
        if self.depth + cost > limit {
            return Err(ParseError::recursion_limit(limit, self.current().span));
        }
        self.depth += cost;
        Ok(())
    }

    pub(super) fn leave(&mut self, cost: usize) {
        self.depth -= cost;
    }

    const fn recovering(&self) -> bool {
        self.config.recover && self.speculating == 0
    }

    /// Runs `parse` tentatively. On failure the cursor, diagnostics and
    /// duplicate-suppression state are restored and `None` is returned.
    pub(super) fn speculate<T>(
        &mut self,
        rule: &str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let mark = self.tokens.mark();
        let diagnostics = self.diagnostics.len();
        let last_error_at = self.last_error_at;
        self.speculating += 1;
        let result = parse(self);
        self.speculating -= 1;
        match result {
            Ok(node) => Some(node),
            Err(error) => {
                trace!(rule, reason = %error, "speculation failed, resetting");
                self.tokens.reset(mark);
                self.diagnostics.truncate(diagnostics);
                self.last_error_at = last_error_at;
                None
            }
        }
    }

    /// Records a diagnostic. Reports at an offset already reported are
    /// dropped.
    ///
    /// Fails with a fatal error once `max_diagnostics` is reached.
    pub(super) fn report(&mut self, error: ParseError) -> Result<(), ParseError> {
        if self.last_error_at == Some(error.span.start) {
            debug!(offset = error.span.start, "suppressing duplicate diagnostic");
            return Ok(());
        }
        self.last_error_at = Some(error.span.start);
        self.diagnostics.push(error);
        if self.diagnostics.len() >= self.config.max_diagnostics {
            return Err(ParseError::too_many_errors(
                self.config.max_diagnostics,
                self.current().span,
            ));
        }
        Ok(())
    }

    /// Reports a malformed literal, or fails with it in strict mode.
    pub(super) fn report_malformed(&mut self, error: ParseError) -> Result<(), ParseError> {
        if self.config.recover {
            self.report(error)
        } else {
            Err(error)
        }
    }

    /// Turns a failed rule into a diagnostic and resynchronizes.
    ///
    /// Fatal errors, strict mode and speculative parses propagate the error
    /// instead.
    pub(super) fn recover<T>(
        &mut self,
        result: Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        match result {
            Ok(node) => Ok(Some(node)),
            Err(error) if error.kind.is_fatal() || !self.recovering() => Err(error),
            Err(error) => {
                self.report(error)?;
                self.synchronize();
                Ok(None)
            }
        }
    }

    /// Skips to the next clause keyword, `;` or end of input. Balanced
    /// parentheses are skipped whole; an unmatched `)` stops the scan inside
    /// a subquery.
    fn synchronize(&mut self) {
        let start = self.tokens.position();
        let mut depth = 0_usize;
        loop {
            match &self.current().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::Keyword(kw) if depth == 0 && is_sync_keyword(*kw) => break,
                TokenKind::RightParen if depth == 0 && self.subquery_depth > 0 => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.tokens.advance();
        }
        debug!(
            skipped = self.tokens.position() - start,
            at = %self.current().kind,
            "resynchronized"
        );
    }

    fn at_clause_boundary(&self) -> bool {
        match &self.current().kind {
            TokenKind::Eof | TokenKind::Semicolon => true,
            TokenKind::Keyword(kw) => is_sync_keyword(*kw),
            TokenKind::RightParen => self.subquery_depth > 0,
            _ => false,
        }
    }

    /// Requires the previous clause to end at a clause boundary.
    fn expect_clause_end(&mut self) -> Result<(), ParseError> {
        if self.at_clause_boundary() {
            return Ok(());
        }
        let error = ParseError::unexpected("clause keyword or end of statement", self.current());
        if !self.recovering() {
            return Err(error);
        }
        self.report(error)?;
        self.synchronize();
        Ok(())
    }

    // ---- statements ---------------------------------------------------

    /// Parses a SELECT query. Each clause is a recovery point.
    pub(super) fn parse_query(&mut self) -> Result<SelectStatement, ParseError> {
        let start = self.expect_keyword(Keyword::Select)?;
        let spec = if self.eat_keyword(Keyword::All) {
            Some(SelectSpec::All)
        } else if self.eat_keyword(Keyword::Distinct) {
            Some(SelectSpec::Distinct)
        } else {
            None
        };

        let result = self.parse_select_elements();
        let columns = self.recover(result)?.unwrap_or_default();
        self.expect_clause_end()?;

        let mut query = SelectStatement {
            spec,
            columns,
            from: None,
            where_clause: None,
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
            span: start,
        };

        if self.check_keyword(Keyword::From) {
            let result = self.parse_from_clause();
            query.from = self.recover(result)?;
            self.expect_clause_end()?;

            if self.check_keyword(Keyword::Where) {
                let result = self.parse_where_clause();
                query.where_clause = self.recover(result)?;
                self.expect_clause_end()?;
            }
            if self.check_keyword(Keyword::Group) {
                let result = self.parse_group_by_clause();
                query.group_by = self.recover(result)?;
                self.expect_clause_end()?;
            }
            if self.check_keyword(Keyword::Having) {
                let result = self.parse_having_clause();
                query.having = self.recover(result)?;
                self.expect_clause_end()?;
            }
            if self.check_keyword(Keyword::Order) {
                let result = self.parse_order_by_clause();
                query.order_by = self.recover(result)?;
                self.expect_clause_end()?;
            }
        }

        if self.check_keyword(Keyword::Limit) {
            let result = self.parse_limit_clause();
            query.limit = self.recover(result)?;
        }

        query.span = self.span_from(start);
        Ok(query)
    }

    fn parse_select_elements(&mut self) -> Result<Vec<SelectElement>, ParseError> {
        let mut first = true;
        self.parse_comma_separated("select element", |p| {
            let star_allowed = first;
            first = false;
            if star_allowed && p.check(&TokenKind::Star) {
                return Ok(SelectElement::Star { span: p.advance() });
            }
            let expr = p.parse_expression()?;
            let alias = p.parse_optional_alias()?;
            Ok(SelectElement::Expression { expr, alias })
        })
    }

    /// `AS alias`, or a bare identifier used as alias.
    fn parse_optional_alias(&mut self) -> Result<Option<Ident>, ParseError> {
        if self.eat_keyword(Keyword::As) || self.current().kind.is_identifier_like() {
            Ok(Some(self.parse_ident()?))
        } else {
            Ok(None)
        }
    }

    fn parse_from_clause(&mut self) -> Result<Relation, ParseError> {
        self.expect_keyword(Keyword::From)?;
        if !self.check(&TokenKind::LeftParen) {
            let name = self.parse_qualified_name()?;
            let alias = self.parse_optional_alias()?;
            return Ok(Relation::Table { name, alias });
        }

        let start = self.advance();
        self.enter(SUBQUERY_LEVEL)?;
        self.subquery_depth += 1;
        let query = self.parse_query();
        self.subquery_depth -= 1;
        self.leave(SUBQUERY_LEVEL);
        let query = query?;
        self.expect(&TokenKind::RightParen, "')'")?;
        self.eat_keyword(Keyword::As);
        let alias = self.parse_ident()?;
        Ok(Relation::Subquery {
            query: Box::new(query),
            alias,
            span: self.span_from(start),
        })
    }

    fn parse_where_clause(&mut self) -> Result<WhereClause, ParseError> {
        let start = self.expect_keyword(Keyword::Where)?;
        let condition = self.parse_expression()?;
        Ok(WhereClause {
            condition,
            span: self.span_from(start),
        })
    }

    fn parse_group_by_clause(&mut self) -> Result<GroupByClause, ParseError> {
        let start = self.expect_keyword(Keyword::Group)?;
        self.expect_keyword(Keyword::By)?;
        let expressions = self.parse_comma_separated("GROUP BY item", Self::parse_expression)?;
        Ok(GroupByClause {
            expressions,
            span: self.span_from(start),
        })
    }

    fn parse_having_clause(&mut self) -> Result<HavingClause, ParseError> {
        let start = self.expect_keyword(Keyword::Having)?;
        let condition = self.parse_expression()?;
        Ok(HavingClause {
            condition,
            span: self.span_from(start),
        })
    }

    /// Parses `ORDER BY item, ...`; shared by queries, `OVER` and filtered
    /// aggregates.
    pub(super) fn parse_order_by_clause(&mut self) -> Result<OrderByClause, ParseError> {
        let start = self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let elements = self.parse_comma_separated("ORDER BY item", Self::parse_order_by_element)?;
        Ok(OrderByClause {
            elements,
            span: self.span_from(start),
        })
    }

    fn parse_order_by_element(&mut self) -> Result<OrderByElement, ParseError> {
        let expr = self.parse_expression()?;
        let direction = if self.eat_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        };
        let nulls = if self.eat_keyword(Keyword::Nulls) {
            if self.eat_keyword(Keyword::First) {
                Some(NullOrdering::First)
            } else if self.eat_keyword(Keyword::Last) {
                Some(NullOrdering::Last)
            } else {
                return Err(ParseError::unexpected("FIRST or LAST", self.current()));
            }
        } else {
            None
        };
        Ok(OrderByElement {
            expr,
            direction,
            nulls,
        })
    }

    /// `LIMIT n`, `LIMIT offset, n` or `LIMIT n OFFSET offset`.
    fn parse_limit_clause(&mut self) -> Result<LimitClause, ParseError> {
        let start = self.expect_keyword(Keyword::Limit)?;
        let first = self.parse_count()?;
        let (limit, offset) = if self.eat(&TokenKind::Comma) {
            (self.parse_count()?, Some(first))
        } else if self.eat_keyword(Keyword::Offset) {
            (first, Some(self.parse_count()?))
        } else {
            (first, None)
        };
        Ok(LimitClause {
            limit,
            offset,
            span: self.span_from(start),
        })
    }

    fn parse_count(&mut self) -> Result<u64, ParseError> {
        let token = self.current();
        if !matches!(token.kind, TokenKind::Decimal) {
            return Err(ParseError::unexpected("integer", token));
        }
        let parsed = token.text.parse::<u64>();
        let span = token.span;
        self.advance();
        parsed.map_err(|e| ParseError::malformed_literal("integer", &e.to_string(), span))
    }

    fn parse_show(&mut self) -> Result<ShowStatement, ParseError> {
        let start = self.expect_keyword(Keyword::Show)?;
        self.expect_keyword(Keyword::Tables)?;
        let table_filter = self.parse_table_filter()?;
        Ok(ShowStatement {
            table_filter,
            span: self.span_from(start),
        })
    }

    fn parse_describe(&mut self) -> Result<DescribeStatement, ParseError> {
        let start = self.expect_keyword(Keyword::Describe)?;
        self.expect_keyword(Keyword::Tables)?;
        let table_filter = self.parse_table_filter()?;
        let column_filter = if self.check_keyword(Keyword::Columns) {
            let filter_start = self.advance();
            self.expect_keyword(Keyword::Like)?;
            let pattern = self.parse_show_pattern()?;
            Some(ColumnFilter {
                pattern,
                span: self.span_from(filter_start),
            })
        } else {
            None
        };
        Ok(DescribeStatement {
            table_filter,
            column_filter,
            span: self.span_from(start),
        })
    }

    fn parse_table_filter(&mut self) -> Result<TableFilter, ParseError> {
        let start = self.expect_keyword(Keyword::Like)?;
        let pattern = self.parse_show_pattern()?;
        Ok(TableFilter {
            pattern,
            span: self.span_from(start),
        })
    }

    /// A quoted pattern, or identifiers and wildcards written without
    /// whitespace between them (`logs-2020%`).
    fn parse_show_pattern(&mut self) -> Result<ShowPattern, ParseError> {
        if let TokenKind::String(value) = &self.current().kind {
            let value = value.clone();
            self.advance();
            return Ok(ShowPattern::String(value));
        }

        let mut text = String::new();
        let mut end: Option<usize> = None;
        loop {
            let token = self.current();
            let glued = end.map_or(true, |offset| offset == token.span.start);
            let part = match &token.kind {
                TokenKind::Identifier(_)
                | TokenKind::Percent
                | TokenKind::Decimal
                | TokenKind::Real
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Dot => true,
                TokenKind::Keyword(kw) => kw.can_be_identifier(),
                _ => false,
            };
            if !glued || !part {
                break;
            }
            text.push_str(&token.text);
            end = Some(token.span.end);
            self.advance();
        }

        if text.is_empty() {
            Err(ParseError::unexpected("pattern", self.current()))
        } else {
            Ok(ShowPattern::Compatible(text))
        }
    }

    // ---- names --------------------------------------------------------

    /// Parses an identifier: bare, backtick-quoted, a keyword usable as
    /// identifier, or a bare identifier with a leading dot (`.kibana`).
    pub(super) fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.current();
        let (value, quoted) = match &token.kind {
            TokenKind::Identifier(name) => (name.clone(), false),
            TokenKind::QuotedIdentifier(name) => (name.clone(), true),
            TokenKind::Keyword(kw) if kw.can_be_identifier() => (token.text.clone(), false),
            TokenKind::Dot => match &self.peek(1).kind {
                TokenKind::Identifier(name) => {
                    let value = format!(".{name}");
                    let start = self.advance();
                    let end = self.advance();
                    return Ok(Ident {
                        value,
                        quoted: false,
                        span: start.merge(end),
                    });
                }
                _ => return Err(ParseError::unexpected("identifier", token)),
            },
            _ => return Err(ParseError::unexpected("identifier", token)),
        };
        let span = self.advance();
        Ok(Ident {
            value,
            quoted,
            span,
        })
    }

    /// Parses `ident ('.' ident)*`.
    pub(super) fn parse_qualified_name(&mut self) -> Result<QualifiedName, ParseError> {
        let first = self.parse_ident()?;
        let mut span = first.span;
        let mut parts = vec![first];
        while self.check(&TokenKind::Dot) && self.peek(1).kind.is_identifier_like() {
            self.advance();
            let part = self.parse_ident()?;
            span = span.merge(part.span);
            parts.push(part);
        }
        Ok(QualifiedName { parts, span })
    }
}

const fn is_sync_keyword(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::From
            | Keyword::Where
            | Keyword::Group
            | Keyword::Having
            | Keyword::Order
            | Keyword::Limit
    )
}
