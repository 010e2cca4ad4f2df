//! Parser error types and diagnostic listeners.

use core::fmt;

use serde::Serialize;
use tracing::warn;

use crate::lexer::{Span, Token, TokenKind};

/// Classification of a parse diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    /// A specific token was required and another was found.
    UnexpectedToken,
    /// No grammar alternative matches at this point.
    NoViableAlternative,
    /// A literal's text could not be converted to a value.
    MalformedLiteral,
    /// A rule claimed success without consuming the input it had to.
    InternalAmbiguity,
    /// Expression nesting exceeded the configured depth.
    RecursionLimitExceeded,
    /// The diagnostic limit was reached.
    TooManyErrors,
}

impl ParseErrorKind {
    /// Fatal kinds abort the parse instead of being recovered from.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InternalAmbiguity | Self::RecursionLimitExceeded | Self::TooManyErrors
        )
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnexpectedToken => "unexpected token",
            Self::NoViableAlternative => "no viable alternative",
            Self::MalformedLiteral => "malformed literal",
            Self::InternalAmbiguity => "internal ambiguity",
            Self::RecursionLimitExceeded => "recursion limit exceeded",
            Self::TooManyErrors => "too many errors",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message} at position {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens, if applicable.
    pub expected: Vec<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected: String = expected.into();
        Self {
            kind: ParseErrorKind::UnexpectedToken,
            message: format!("expected {expected}, found {}", found.kind),
            span: found.span,
            expected: vec![expected],
            found: Some(found.kind.clone()),
        }
    }

    /// Creates a "no viable alternative" error listing what could have
    /// started the construct.
    #[must_use]
    pub fn no_viable_alternative(what: &str, expected: &[&str], found: &Token) -> Self {
        Self {
            kind: ParseErrorKind::NoViableAlternative,
            message: format!("no viable alternative for {what} at {}", found.kind),
            span: found.span,
            expected: expected.iter().map(|e| (*e).to_string()).collect(),
            found: Some(found.kind.clone()),
        }
    }

    /// Creates a "malformed literal" error.
    #[must_use]
    pub fn malformed_literal(what: &str, reason: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::MalformedLiteral,
            format!("malformed {what} literal: {reason}"),
            span,
        )
    }

    /// Creates an "internal ambiguity" error for a rule that did not make
    /// progress.
    #[must_use]
    pub fn internal_ambiguity(rule: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::InternalAmbiguity,
            format!("{rule} matched without consuming input"),
            span,
        )
    }

    /// Creates a "recursion limit exceeded" error.
    #[must_use]
    pub fn recursion_limit(limit: usize, span: Span) -> Self {
        Self::new(
            ParseErrorKind::RecursionLimitExceeded,
            format!("expression nesting exceeds the limit of {limit}"),
            span,
        )
    }

    /// Creates a "too many errors" error.
    #[must_use]
    pub fn too_many_errors(limit: usize, span: Span) -> Self {
        Self::new(
            ParseErrorKind::TooManyErrors,
            format!("too many errors (limit {limit}), giving up"),
            span,
        )
    }
}

/// Receives syntax errors as they are reported.
///
/// Listeners observe diagnostics in source order; the parse itself does not
/// depend on them.
pub trait ErrorListener {
    fn syntax_error(&mut self, error: &ParseError);
}

impl ErrorListener for Vec<ParseError> {
    fn syntax_error(&mut self, error: &ParseError) {
        self.push(error.clone());
    }
}

/// Forwards every syntax error to `tracing` at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl ErrorListener for LoggingListener {
    fn syntax_error(&mut self, error: &ParseError) {
        warn!(
            kind = %error.kind,
            start = error.span.start,
            end = error.span.end,
            "{}",
            error.message
        );
    }
}
