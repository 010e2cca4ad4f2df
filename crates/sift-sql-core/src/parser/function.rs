//! Function-call parsing.
//!
//! A call is classified once, by its name and a bounded lookahead, into
//! exactly one [`FunctionKind`] shape.

use super::error::ParseError;
use super::parser::{Parser, CALL_LEVEL};
use super::vocabulary::{self, FunctionFamily};
use crate::ast::{
    AggregateFunction, AggregateName, CaseAlternative, CaseFunction, CastFunction, DataType,
    Expression, FilterClause, FilteredAggregate, FunctionCall, FunctionKind, GetFormatType,
    HighlightArg, HighlightFunction, OverClause, PartitionByClause, PercentileName,
    RankingFunction, RelevanceArg, RelevanceField, RelevanceFunction, RelevanceSyntax,
    RelevanceTarget, RelevanceValue, ScalarCategory, ScalarFunction, ScoreRelevance,
    TimestampFunction, WeightedField, WindowFunction, WindowKind,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser {
    /// Parses a function call at the current token.
    pub(super) fn parse_function_call(&mut self) -> Result<Box<FunctionCall>, ParseError> {
        self.enter(CALL_LEVEL)?;
        let result = self.parse_function_call_inner();
        self.leave(CALL_LEVEL);
        result
    }

    fn parse_function_call_inner(&mut self) -> Result<Box<FunctionCall>, ParseError> {
        let start = self.current().span;
        let kind = match &self.current().kind {
            TokenKind::Keyword(Keyword::Case) => FunctionKind::Case(self.parse_case()?),
            TokenKind::Keyword(Keyword::Cast) => FunctionKind::Cast(self.parse_cast()?),
            TokenKind::Keyword(
                Keyword::Date | Keyword::Time | Keyword::Timestamp | Keyword::Datetime,
            ) => FunctionKind::Scalar(self.parse_scalar(ScalarCategory::DateTime)?),
            TokenKind::Identifier(name) => match vocabulary::classify(&name.to_ascii_uppercase()) {
                Some(family) => self.parse_classified(family)?,
                None => {
                    let mut error =
                        ParseError::no_viable_alternative("function call", &[], self.current());
                    error.message = format!("unknown function {name}");
                    return Err(error);
                }
            },
            _ => {
                return Err(ParseError::no_viable_alternative(
                    "function call",
                    &["function name", "CASE", "CAST"],
                    self.current(),
                ))
            }
        };
        Ok(self.finish(start, kind))
    }

    fn finish(&self, start: Span, kind: FunctionKind) -> Box<FunctionCall> {
        Box::new(FunctionCall {
            kind,
            span: self.span_from(start),
        })
    }

    fn parse_classified(&mut self, family: FunctionFamily) -> Result<FunctionKind, ParseError> {
        match family {
            FunctionFamily::Nested if self.at_nested_all() => self.parse_nested_all(),
            FunctionFamily::Nested => Ok(FunctionKind::Scalar(
                self.parse_scalar(ScalarCategory::Nested)?,
            )),
            FunctionFamily::Scalar(category) => {
                Ok(FunctionKind::Scalar(self.parse_scalar(category)?))
            }
            FunctionFamily::Ranking(function) => self.parse_ranking(function),
            FunctionFamily::Aggregate(function) => {
                let aggregate = self.parse_aggregate(function)?;
                self.parse_aggregate_suffix(aggregate)
            }
            FunctionFamily::Percentile(function) => {
                let aggregate = self.parse_percentile(function)?;
                self.parse_aggregate_suffix(aggregate)
            }
            FunctionFamily::Score => Ok(FunctionKind::ScoreRelevance(self.parse_score()?)),
            FunctionFamily::NoFieldRelevance
            | FunctionFamily::SingleFieldRelevance
            | FunctionFamily::MultiFieldRelevance => Ok(FunctionKind::Relevance(
                self.parse_relevance_function(family)?,
            )),
            FunctionFamily::Highlight => Ok(FunctionKind::Highlight(self.parse_highlight()?)),
            FunctionFamily::Position => self.parse_position(),
            FunctionFamily::Extract => self.parse_extract(),
            FunctionFamily::GetFormat => self.parse_get_format(),
            FunctionFamily::Timestamp(function) => self.parse_timestamp_function(function),
        }
    }

    /// Consumes the function name and the opening parenthesis.
    fn open_call(&mut self) -> Result<String, ParseError> {
        let name = self.current().text.clone();
        self.advance();
        self.expect(&TokenKind::LeftParen, "'('")?;
        Ok(name)
    }

    fn close_call(&mut self) -> Result<(), ParseError> {
        self.expect(&TokenKind::RightParen, "')'").map(|_| ())
    }

    /// Arguments up to the closing parenthesis, possibly none.
    fn parse_call_args(&mut self) -> Result<Vec<Expression>, ParseError> {
        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_comma_separated("function argument", Self::parse_expression)?
        };
        self.close_call()?;
        Ok(args)
    }

    fn parse_scalar(&mut self, category: ScalarCategory) -> Result<ScalarFunction, ParseError> {
        let name = self.open_call()?;
        let args = self.parse_call_args()?;
        Ok(ScalarFunction {
            name,
            category,
            args,
        })
    }

    /// `nested(path.*)`
    fn parse_nested_all(&mut self) -> Result<FunctionKind, ParseError> {
        let name = self.open_call()?;
        let path = self.parse_qualified_name()?;
        self.expect(&TokenKind::Dot, "'.'")?;
        self.expect(&TokenKind::Star, "'*'")?;
        self.close_call()?;
        Ok(FunctionKind::NestedAll { name, path })
    }

    fn parse_case(&mut self) -> Result<CaseFunction, ParseError> {
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        let mut alternatives = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            alternatives.push(CaseAlternative { condition, result });
        }
        if alternatives.is_empty() {
            return Err(ParseError::unexpected("WHEN", self.current()));
        }

        let else_result = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        Ok(CaseFunction {
            operand,
            alternatives,
            else_result,
        })
    }

    fn parse_cast(&mut self) -> Result<CastFunction, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen, "'('")?;
        let expr = self.parse_expression()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = match &self.current().kind {
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                DataType::from_name(&self.current().text)
            }
            _ => None,
        };
        let Some(data_type) = data_type else {
            return Err(ParseError::unexpected("type name", self.current()));
        };
        self.advance();
        self.close_call()?;
        Ok(CastFunction {
            expr: Box::new(expr),
            data_type,
        })
    }

    // ---- window and aggregate functions -----------------------------------

    fn parse_ranking(&mut self, function: RankingFunction) -> Result<FunctionKind, ParseError> {
        self.open_call()?;
        let args = self.parse_call_args()?;
        if !self.check_keyword(Keyword::Over) {
            return Err(ParseError::unexpected("OVER", self.current()));
        }
        let over = self.parse_over_clause()?;
        Ok(FunctionKind::Window(WindowFunction {
            function: WindowKind::Ranking { function, args },
            over,
        }))
    }

    fn parse_aggregate(&mut self, function: AggregateName) -> Result<AggregateFunction, ParseError> {
        self.open_call()?;
        let aggregate = if function == AggregateName::Count && self.check(&TokenKind::Star) {
            self.advance();
            AggregateFunction::CountStar
        } else if function == AggregateName::Count && self.eat_keyword(Keyword::Distinct) {
            let args = self.parse_comma_separated("COUNT argument", Self::parse_expression)?;
            AggregateFunction::CountDistinct { args }
        } else {
            AggregateFunction::Regular {
                function,
                arg: Box::new(self.parse_expression()?),
            }
        };
        self.close_call()?;
        Ok(aggregate)
    }

    /// `PERCENTILE(field, percent [, compression])`
    fn parse_percentile(
        &mut self,
        function: PercentileName,
    ) -> Result<AggregateFunction, ParseError> {
        self.open_call()?;
        let field = self.parse_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        let percent = self.parse_numeric_constant()?;
        let compression = if self.eat(&TokenKind::Comma) {
            Some(self.parse_numeric_constant()?)
        } else {
            None
        };
        self.close_call()?;
        Ok(AggregateFunction::Percentile {
            function,
            field: Box::new(field),
            percent,
            compression,
        })
    }

    /// `OVER (...)`, `FILTER (...)` or `ORDER BY ... FILTER (...)` after an
    /// aggregate.
    fn parse_aggregate_suffix(
        &mut self,
        aggregate: AggregateFunction,
    ) -> Result<FunctionKind, ParseError> {
        if self.check_keyword(Keyword::Over) {
            let over = self.parse_over_clause()?;
            return Ok(FunctionKind::Window(WindowFunction {
                function: WindowKind::Aggregate(aggregate),
                over,
            }));
        }
        if self.check_keyword(Keyword::Filter) {
            let filter = self.parse_filter_clause()?;
            return Ok(FunctionKind::FilteredAggregate(FilteredAggregate {
                aggregate,
                order_by: None,
                filter,
            }));
        }
        if self.check_keyword(Keyword::Order) {
            // The ORDER BY may just as well belong to the enclosing query.
            let ordered = self.speculate("ordered aggregate filter", |p| {
                let order_by = p.parse_order_by_clause()?;
                let filter = p.parse_filter_clause()?;
                Ok((order_by, filter))
            });
            if let Some((order_by, filter)) = ordered {
                return Ok(FunctionKind::FilteredAggregate(FilteredAggregate {
                    aggregate,
                    order_by: Some(order_by),
                    filter,
                }));
            }
        }
        Ok(FunctionKind::Aggregate(aggregate))
    }

    fn parse_over_clause(&mut self) -> Result<OverClause, ParseError> {
        let start = self.expect_keyword(Keyword::Over)?;
        self.expect(&TokenKind::LeftParen, "'('")?;
        let partition_by = if self.check_keyword(Keyword::Partition) {
            let partition_start = self.advance();
            self.expect_keyword(Keyword::By)?;
            let expressions =
                self.parse_comma_separated("PARTITION BY item", Self::parse_expression)?;
            Some(PartitionByClause {
                expressions,
                span: self.span_from(partition_start),
            })
        } else {
            None
        };
        let order_by = if self.check_keyword(Keyword::Order) {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };
        self.close_call()?;
        Ok(OverClause {
            partition_by,
            order_by,
            span: self.span_from(start),
        })
    }

    fn parse_filter_clause(&mut self) -> Result<FilterClause, ParseError> {
        let start = self.expect_keyword(Keyword::Filter)?;
        self.expect(&TokenKind::LeftParen, "'('")?;
        self.expect_keyword(Keyword::Where)?;
        let condition = self.parse_expression()?;
        self.close_call()?;
        Ok(FilterClause {
            condition: Box::new(condition),
            span: self.span_from(start),
        })
    }

    // ---- relevance functions ----------------------------------------------

    /// `SCORE(relevance [, weight])`
    fn parse_score(&mut self) -> Result<ScoreRelevance, ParseError> {
        let name = self.open_call()?;
        let relevance = if self.at_alternate_relevance() {
            self.parse_alternate_relevance_function()?
        } else {
            let family = self
                .current()
                .bare_word()
                .filter(|word| vocabulary::is_relevance(word))
                .and_then(|word| vocabulary::classify(&word));
            let Some(family) = family else {
                return Err(ParseError::no_viable_alternative(
                    "relevance function",
                    &["MATCH", "MULTI_MATCH", "QUERY", "field = MATCH_QUERY"],
                    self.current(),
                ));
            };
            self.parse_relevance_function(family)?
        };
        let weight = if self.eat(&TokenKind::Comma) {
            Some(self.parse_weight()?)
        } else {
            None
        };
        self.close_call()?;
        Ok(ScoreRelevance {
            name,
            relevance,
            weight,
        })
    }

    fn parse_relevance_function(
        &mut self,
        family: FunctionFamily,
    ) -> Result<RelevanceFunction, ParseError> {
        let name = self.open_call()?;
        let (syntax, target, query) = match family {
            FunctionFamily::NoFieldRelevance => (
                RelevanceSyntax::Standard,
                RelevanceTarget::NoField,
                self.parse_relevance_value()?,
            ),
            FunctionFamily::SingleFieldRelevance => {
                let field = self.parse_relevance_field()?;
                self.expect(&TokenKind::Comma, "','")?;
                let query = self.parse_relevance_value()?;
                (
                    RelevanceSyntax::Standard,
                    RelevanceTarget::SingleField(field),
                    query,
                )
            }
            _ if self.at_named_relevance_argument() => {
                let (query, fields) = self.parse_named_relevance_arguments()?;
                (
                    RelevanceSyntax::NamedArguments,
                    RelevanceTarget::MultiField(fields),
                    query,
                )
            }
            _ => {
                let fields = self.parse_field_list()?;
                self.expect(&TokenKind::Comma, "','")?;
                let query = self.parse_relevance_value()?;
                (
                    RelevanceSyntax::Standard,
                    RelevanceTarget::MultiField(fields),
                    query,
                )
            }
        };
        let args = self.parse_relevance_args()?;
        self.close_call()?;
        Ok(RelevanceFunction {
            name,
            syntax,
            target,
            query,
            args,
        })
    }

    /// `field = match_query('query', ...)`, as a call node.
    pub(super) fn parse_alternate_relevance(&mut self) -> Result<Box<FunctionCall>, ParseError> {
        let start = self.current().span;
        let relevance = self.parse_alternate_relevance_function()?;
        Ok(self.finish(start, FunctionKind::Relevance(relevance)))
    }

    fn parse_alternate_relevance_function(&mut self) -> Result<RelevanceFunction, ParseError> {
        let field = self.parse_relevance_field()?;
        self.expect(&TokenKind::Eq, "'='")?;
        let upper = self.current().bare_word().unwrap_or_default();
        if !vocabulary::is_alternate_relevance(&upper) {
            return Err(ParseError::unexpected("relevance function", self.current()));
        }
        let name = self.open_call()?;
        let query = self.parse_relevance_value()?;
        let args = self.parse_relevance_args()?;
        self.close_call()?;
        let target = if vocabulary::is_alternate_multi_field(&upper) {
            RelevanceTarget::MultiField(vec![WeightedField {
                field,
                weight: None,
            }])
        } else {
            RelevanceTarget::SingleField(field)
        };
        Ok(RelevanceFunction {
            name,
            syntax: RelevanceSyntax::FieldEquals,
            target,
            query,
            args,
        })
    }

    fn at_named_relevance_argument(&self) -> bool {
        let token = self.current();
        (token.is_word("query") || token.is_word("fields"))
            && matches!(self.peek(1).kind, TokenKind::Eq)
    }

    /// `query = 'q', fields = 'f'`, in either order.
    fn parse_named_relevance_arguments(
        &mut self,
    ) -> Result<(RelevanceValue, Vec<WeightedField>), ParseError> {
        let mut query = None;
        let mut fields = None;
        for i in 0..2 {
            if i > 0 {
                self.expect(&TokenKind::Comma, "','")?;
            }
            let token = self.current();
            if token.is_word("query") {
                self.advance();
                self.expect(&TokenKind::Eq, "'='")?;
                query = Some(self.parse_relevance_value()?);
            } else if token.is_word("fields") {
                self.advance();
                self.expect(&TokenKind::Eq, "'='")?;
                fields = Some(if self.check(&TokenKind::LeftBracket) {
                    self.parse_field_list()?
                } else {
                    vec![self.parse_weighted_field()?]
                });
            } else {
                return Err(ParseError::unexpected("query or fields", token));
            }
        }
        match (query, fields) {
            (Some(query), Some(fields)) => Ok((query, fields)),
            (None, _) => Err(ParseError::unexpected("query", self.current())),
            (_, None) => Err(ParseError::unexpected("fields", self.current())),
        }
    }

    /// `[field ^ weight, ...]`; the caret may be left out.
    fn parse_field_list(&mut self) -> Result<Vec<WeightedField>, ParseError> {
        self.expect(&TokenKind::LeftBracket, "'['")?;
        let fields = self.parse_comma_separated("relevance field", Self::parse_weighted_field)?;
        self.expect(&TokenKind::RightBracket, "']'")?;
        Ok(fields)
    }

    fn parse_weighted_field(&mut self) -> Result<WeightedField, ParseError> {
        let field = self.parse_relevance_field()?;
        let weight = if self.eat(&TokenKind::Caret)
            || matches!(self.current().kind, TokenKind::Decimal | TokenKind::Real)
        {
            Some(self.parse_weight()?)
        } else {
            None
        };
        Ok(WeightedField { field, weight })
    }

    fn parse_relevance_field(&mut self) -> Result<RelevanceField, ParseError> {
        match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                let span = self.advance();
                Ok(RelevanceField::Quoted { value, span })
            }
            _ => Ok(RelevanceField::Name(self.parse_qualified_name()?)),
        }
    }

    fn parse_relevance_value(&mut self) -> Result<RelevanceValue, ParseError> {
        if self.at_constant() {
            Ok(RelevanceValue::Constant(self.parse_constant()?))
        } else {
            Ok(RelevanceValue::Name(self.parse_qualified_name()?))
        }
    }

    /// `, option = value` pairs. Option names come from a fixed vocabulary
    /// unless written as a string.
    fn parse_relevance_args(&mut self) -> Result<Vec<RelevanceArg>, ParseError> {
        let mut args = Vec::new();
        while self.eat(&TokenKind::Comma) {
            let token = self.current();
            let (name, quoted_name) = match &token.kind {
                TokenKind::Identifier(name)
                    if vocabulary::is_relevance_arg(&name.to_ascii_uppercase()) =>
                {
                    (name.clone(), false)
                }
                TokenKind::String(name) => (name.clone(), true),
                _ => return Err(ParseError::unexpected("relevance option name", token)),
            };
            self.advance();
            self.expect(&TokenKind::Eq, "'='")?;
            let value = self.parse_relevance_value()?;
            args.push(RelevanceArg {
                name,
                quoted_name,
                value,
            });
        }
        Ok(args)
    }

    /// A finite numeric boost.
    fn parse_weight(&mut self) -> Result<f64, ParseError> {
        let token = self.current();
        if !matches!(token.kind, TokenKind::Decimal | TokenKind::Real) {
            return Err(ParseError::unexpected("number", token));
        }
        let span = token.span;
        let weight = token.text.parse::<f64>().ok().filter(|w| w.is_finite());
        self.advance();
        weight.ok_or_else(|| ParseError::malformed_literal("real", "value out of range", span))
    }

    /// `HIGHLIGHT(field, option = 'value', ...)`
    fn parse_highlight(&mut self) -> Result<HighlightFunction, ParseError> {
        self.open_call()?;
        let field = self.parse_relevance_field()?;
        let mut args = Vec::new();
        while self.eat(&TokenKind::Comma) {
            let token = self.current();
            let name = match &token.kind {
                TokenKind::Identifier(name)
                    if vocabulary::is_highlight_arg(&name.to_ascii_uppercase()) =>
                {
                    name.clone()
                }
                _ => return Err(ParseError::unexpected("highlight option name", token)),
            };
            self.advance();
            self.expect(&TokenKind::Eq, "'='")?;
            let (value, _) = self.expect_string()?;
            args.push(HighlightArg { name, value });
        }
        self.close_call()?;
        Ok(HighlightFunction { field, args })
    }

    // ---- special forms ----------------------------------------------------

    /// `POSITION(substring IN string)`. A top-level `IN` in the substring
    /// is the separator, never a predicate.
    fn parse_position(&mut self) -> Result<FunctionKind, ParseError> {
        self.open_call()?;
        let saved = self.in_disabled_at.replace(self.depth + 1);
        let substring = self.parse_expression();
        self.in_disabled_at = saved;
        let substring = substring?;
        self.expect_keyword(Keyword::In)?;
        let string = self.parse_expression()?;
        self.close_call()?;
        Ok(FunctionKind::Position {
            substring: Box::new(substring),
            string: Box::new(string),
        })
    }

    /// `EXTRACT(part FROM arg)`
    fn parse_extract(&mut self) -> Result<FunctionKind, ParseError> {
        self.open_call()?;
        let part = self.parse_datetime_part()?;
        self.expect_keyword(Keyword::From)?;
        let arg = self.parse_expression()?;
        self.close_call()?;
        Ok(FunctionKind::Extract {
            part,
            arg: Box::new(arg),
        })
    }

    fn parse_get_format(&mut self) -> Result<FunctionKind, ParseError> {
        self.open_call()?;
        let format_type = match self.current().as_keyword() {
            Some(Keyword::Date) => GetFormatType::Date,
            Some(Keyword::Datetime) => GetFormatType::Datetime,
            Some(Keyword::Time) => GetFormatType::Time,
            Some(Keyword::Timestamp) => GetFormatType::Timestamp,
            _ => {
                return Err(ParseError::unexpected(
                    "DATE, DATETIME, TIME or TIMESTAMP",
                    self.current(),
                ))
            }
        };
        self.advance();
        self.expect(&TokenKind::Comma, "','")?;
        let format = self.parse_expression()?;
        self.close_call()?;
        Ok(FunctionKind::GetFormat {
            format_type,
            format: Box::new(format),
        })
    }

    /// `TIMESTAMPADD(part, a, b)` and `TIMESTAMPDIFF(part, a, b)`. Only
    /// single units are accepted.
    fn parse_timestamp_function(
        &mut self,
        function: TimestampFunction,
    ) -> Result<FunctionKind, ParseError> {
        self.open_call()?;
        let token = self.current().clone();
        let part = self.parse_datetime_part()?;
        if !part.is_simple() {
            return Err(ParseError::unexpected("single date/time unit", &token));
        }
        self.expect(&TokenKind::Comma, "','")?;
        let first = self.parse_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        let second = self.parse_expression()?;
        self.close_call()?;
        Ok(FunctionKind::Timestamp {
            function,
            part,
            first: Box::new(first),
            second: Box::new(second),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        AggregateFunction, AggregateName, ExpressionAtom, FunctionCall, FunctionKind,
        RelevanceSyntax, RelevanceTarget, ScalarCategory, WindowKind,
    };
    use crate::parser::{ParseErrorKind, Parser};

    fn call(sql: &str) -> FunctionCall {
        let mut parser = Parser::new(sql);
        let expression = parser.parse_expression().unwrap();
        assert!(parser.current().is_eof(), "trailing input in {sql}");
        match expression.as_atom() {
            Some(ExpressionAtom::Function(call)) => (**call).clone(),
            other => panic!("expected a function call, got {other:?}"),
        }
    }

    fn kind(sql: &str) -> FunctionKind {
        call(sql).kind
    }

    #[test]
    fn test_scalar_categories() {
        let FunctionKind::Scalar(scalar) = kind("abs(-1)") else {
            panic!("expected a scalar call");
        };
        assert_eq!(scalar.category, ScalarCategory::Mathematical);
        assert_eq!(scalar.args.len(), 1);

        let FunctionKind::Scalar(scalar) = kind("DATE(ts)") else {
            panic!("expected a scalar call");
        };
        assert_eq!(scalar.category, ScalarCategory::DateTime);

        let FunctionKind::Scalar(scalar) = kind("now()") else {
            panic!("expected a scalar call");
        };
        assert!(scalar.args.is_empty());
    }

    #[test]
    fn test_nested_forms() {
        assert!(matches!(kind("nested(message.*)"), FunctionKind::NestedAll { .. }));
        let FunctionKind::Scalar(scalar) = kind("nested(message.info)") else {
            panic!("expected a scalar call");
        };
        assert_eq!(scalar.category, ScalarCategory::Nested);
    }

    #[test]
    fn test_count_forms() {
        assert!(matches!(
            kind("COUNT(*)"),
            FunctionKind::Aggregate(AggregateFunction::CountStar)
        ));
        assert!(matches!(
            kind("count(DISTINCT a, b)"),
            FunctionKind::Aggregate(AggregateFunction::CountDistinct { .. })
        ));
        assert!(matches!(
            kind("avg(x)"),
            FunctionKind::Aggregate(AggregateFunction::Regular {
                function: AggregateName::Avg,
                ..
            })
        ));
    }

    #[test]
    fn test_window_functions() {
        let FunctionKind::Window(window) = kind("ROW_NUMBER() OVER (PARTITION BY a ORDER BY b)")
        else {
            panic!("expected a window call");
        };
        assert!(matches!(window.function, WindowKind::Ranking { .. }));
        assert!(window.over.partition_by.is_some());
        assert!(window.over.order_by.is_some());

        assert!(matches!(
            kind("SUM(x) OVER ()"),
            FunctionKind::Window(_)
        ));
    }

    #[test]
    fn test_ranking_requires_over() {
        let mut parser = Parser::new("RANK()");
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_filtered_aggregates() {
        let FunctionKind::FilteredAggregate(filtered) = kind("COUNT(*) FILTER(WHERE a > 1)")
        else {
            panic!("expected a filtered aggregate");
        };
        assert!(filtered.order_by.is_none());

        let FunctionKind::FilteredAggregate(filtered) =
            kind("MAX(x) ORDER BY y FILTER(WHERE a > 1)")
        else {
            panic!("expected a filtered aggregate");
        };
        assert!(filtered.order_by.is_some());
    }

    #[test]
    fn test_order_without_filter_is_left_alone() {
        let mut parser = Parser::new("MAX(x) ORDER BY y");
        let expression = parser.parse_expression().unwrap();
        assert!(matches!(
            expression.as_atom(),
            Some(ExpressionAtom::Function(call)) if matches!(call.kind, FunctionKind::Aggregate(_))
        ));
        assert!(parser.check_keyword(crate::lexer::Keyword::Order));
        assert!(parser.diagnostics.is_empty());
    }

    #[test]
    fn test_percentile() {
        let FunctionKind::Aggregate(AggregateFunction::Percentile { compression, .. }) =
            kind("percentile_approx(latency, 95, 100)")
        else {
            panic!("expected a percentile aggregate");
        };
        assert!(compression.is_some());
    }

    #[test]
    fn test_relevance_forms() {
        let FunctionKind::Relevance(standard) = kind("match(title, 'rust')") else {
            panic!("expected a relevance call");
        };
        assert_eq!(standard.syntax, RelevanceSyntax::Standard);
        assert!(matches!(standard.target, RelevanceTarget::SingleField(_)));

        let FunctionKind::Relevance(alternate) = kind("title = match_query('rust')") else {
            panic!("expected a relevance call");
        };
        assert_eq!(alternate.syntax, RelevanceSyntax::FieldEquals);
        let (RelevanceTarget::SingleField(a), RelevanceTarget::SingleField(b)) =
            (&standard.target, &alternate.target)
        else {
            panic!("expected single-field targets");
        };
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(standard.query.to_string(), alternate.query.to_string());
        assert_eq!(standard.args, alternate.args);
    }

    #[test]
    fn test_multi_field_relevance() {
        let FunctionKind::Relevance(relevance) =
            kind("multi_match(['a' ^ 2, b], 'q', operator = 'AND')")
        else {
            panic!("expected a relevance call");
        };
        let RelevanceTarget::MultiField(fields) = relevance.target else {
            panic!("expected multiple fields");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].weight, Some(2.0));
        assert_eq!(relevance.args.len(), 1);

        let FunctionKind::Relevance(named) =
            kind("query_string(fields = ['a'], query = 'q', default_operator = 'OR')")
        else {
            panic!("expected a relevance call");
        };
        assert_eq!(named.syntax, RelevanceSyntax::NamedArguments);
    }

    #[test]
    fn test_unknown_relevance_option() {
        let mut parser = Parser::new("match(title, 'q', colour = 'red')");
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_field_equals_reports_unknown_option() {
        let mut parser = Parser::new("title = match_query('x', bogus = 1)");
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(error.expected, vec!["relevance option name".to_string()]);
        assert_eq!(error.span.start, 25);

        let mut parser = Parser::new("score(title = match_query('x', bogus = 1))");
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.expected, vec!["relevance option name".to_string()]);
    }

    #[test]
    fn test_score_wraps_relevance() {
        let FunctionKind::ScoreRelevance(score) = kind("score(match(a, 'x'), 2.5)") else {
            panic!("expected a score call");
        };
        assert_eq!(score.weight, Some(2.5));

        let FunctionKind::ScoreRelevance(score) = kind("SCORE(a = match_phrase('x'))") else {
            panic!("expected a score call");
        };
        assert_eq!(score.relevance.syntax, RelevanceSyntax::FieldEquals);
    }

    #[test]
    fn test_highlight() {
        let FunctionKind::Highlight(highlight) =
            kind("highlight(title, pre_tags = '<b>', post_tags = '</b>')")
        else {
            panic!("expected a highlight call");
        };
        assert_eq!(highlight.args.len(), 2);
    }

    #[test]
    fn test_position_in_is_separator() {
        let FunctionKind::Position { substring, .. } = kind("POSITION('a' IN (name))") else {
            panic!("expected POSITION");
        };
        assert_eq!(substring.to_string(), "'a'");

        let FunctionKind::Position { substring, .. } = kind("POSITION(('a' IN ('a')) IN name)")
        else {
            panic!("expected POSITION");
        };
        assert!(substring.as_atom().is_some());
    }

    #[test]
    fn test_special_forms() {
        assert!(matches!(
            kind("EXTRACT(YEAR_MONTH FROM ts)"),
            FunctionKind::Extract { .. }
        ));
        assert!(matches!(
            kind("GET_FORMAT(DATE, 'USA')"),
            FunctionKind::GetFormat { .. }
        ));
        assert!(matches!(
            kind("TIMESTAMPADD(DAY, 1, ts)"),
            FunctionKind::Timestamp { .. }
        ));
        assert!(Parser::new("TIMESTAMPADD(DAY_HOUR, 1, ts)")
            .parse_expression()
            .is_err());
    }

    #[test]
    fn test_case_and_cast() {
        let FunctionKind::Case(case) = kind("CASE a WHEN 1 THEN 'x' ELSE 'y' END") else {
            panic!("expected CASE");
        };
        assert!(case.operand.is_some());
        assert!(case.else_result.is_some());

        assert!(matches!(kind("CAST(a AS DATE)"), FunctionKind::Cast(_)));
        assert!(Parser::new("CAST(a AS blob)").parse_expression().is_err());
    }

    #[test]
    fn test_unknown_function() {
        let mut parser = Parser::new("frobnicate(1)");
        let error = parser.parse_expression().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::NoViableAlternative);
        assert_eq!(error.message, "unknown function frobnicate");
    }

    #[test]
    fn test_call_span_covers_call() {
        let call = call("  abs(1)");
        assert_eq!(call.span.start, 2);
        assert_eq!(call.span.end, 8);
    }
}
