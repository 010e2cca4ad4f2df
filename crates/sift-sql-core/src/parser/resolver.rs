//! Bounded-lookahead decisions between competing grammar alternatives.
//!
//! The checks here only peek at tokens; they never consume input. Where a
//! token scan cannot settle a decision the caller falls back to
//! [`Parser::speculate`].

use super::parser::Parser;
use super::vocabulary;
use crate::ast::DatetimeConstant;
use crate::lexer::{Keyword, TokenKind};

/// How an expression atom starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomStart {
    Parenthesized,
    Constant,
    Function,
    Column,
}

impl Parser {
    /// Decides which atom alternative the current token starts.
    ///
    /// Alternatives are tried in declaration order: constants first, then
    /// column names, then function calls. `DATE`, `TIME` and `TIMESTAMP`
    /// start a literal before a string, a call before `(`, and are a column
    /// name otherwise.
    pub(super) fn resolve_atom(&self) -> Option<AtomStart> {
        let next = &self.peek(1).kind;
        match &self.current().kind {
            TokenKind::LeftParen => Some(AtomStart::Parenthesized),
            TokenKind::Keyword(Keyword::Case | Keyword::Cast) => Some(AtomStart::Function),
            TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp)
                if matches!(next, TokenKind::String(_)) =>
            {
                Some(AtomStart::Constant)
            }
            TokenKind::Keyword(
                Keyword::Date | Keyword::Time | Keyword::Timestamp | Keyword::Datetime,
            ) if matches!(next, TokenKind::LeftParen) => Some(AtomStart::Function),
            _ if self.at_constant() => Some(AtomStart::Constant),
            TokenKind::Identifier(_) if matches!(next, TokenKind::LeftParen) => {
                Some(AtomStart::Function)
            }
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => Some(AtomStart::Column),
            TokenKind::Keyword(kw) if kw.can_be_identifier() => Some(AtomStart::Column),
            TokenKind::Dot if matches!(next, TokenKind::Identifier(_)) => Some(AtomStart::Column),
            _ => None,
        }
    }

    /// Whether the current token starts a constant.
    pub(super) fn at_constant(&self) -> bool {
        let next = &self.peek(1).kind;
        match &self.current().kind {
            TokenKind::String(_)
            | TokenKind::Decimal
            | TokenKind::Real
            | TokenKind::LeftBrace
            | TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null | Keyword::Interval) => {
                true
            }
            TokenKind::Plus | TokenKind::Minus => {
                matches!(next, TokenKind::Decimal | TokenKind::Real)
            }
            TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp) => {
                matches!(next, TokenKind::String(_))
            }
            TokenKind::Identifier(_) => self.at_datetime_constant(),
            _ => false,
        }
    }

    /// A bare `CURRENT_DATE`-style word, optionally followed by `()`.
    ///
    /// With anything inside the parentheses it is a scalar call instead.
    pub(super) fn at_datetime_constant(&self) -> bool {
        let is_constant = self
            .current()
            .bare_word()
            .is_some_and(|word| DatetimeConstant::from_name(&word).is_some());
        is_constant
            && (!matches!(self.peek(1).kind, TokenKind::LeftParen)
                || matches!(self.peek(2).kind, TokenKind::RightParen))
    }

    /// `field = match_query(` and the other `field = fn(` relevance forms.
    pub(super) fn at_alternate_relevance(&self) -> bool {
        let Some(k) = self.scan_relevance_field(0) else {
            return false;
        };
        matches!(self.peek(k).kind, TokenKind::Eq)
            && self
                .peek(k + 1)
                .bare_word()
                .is_some_and(|word| vocabulary::is_alternate_relevance(&word))
            && matches!(self.peek(k + 2).kind, TokenKind::LeftParen)
    }

    /// `nested(path.*)`, as opposed to a scalar `nested(...)` call. The
    /// cursor sits on the function name.
    pub(super) fn at_nested_all(&self) -> bool {
        if !matches!(self.peek(1).kind, TokenKind::LeftParen) {
            return false;
        }
        let Some(k) = self.scan_qualified_name(2) else {
            return false;
        };
        matches!(self.peek(k).kind, TokenKind::Dot)
            && matches!(self.peek(k + 1).kind, TokenKind::Star)
            && matches!(self.peek(k + 2).kind, TokenKind::RightParen)
    }

    /// Offset just past a relevance field starting at `k`.
    fn scan_relevance_field(&self, k: usize) -> Option<usize> {
        if matches!(self.peek(k).kind, TokenKind::String(_)) {
            Some(k + 1)
        } else {
            self.scan_qualified_name(k)
        }
    }

    /// Offset just past a qualified name starting at `k`.
    fn scan_qualified_name(&self, k: usize) -> Option<usize> {
        let mut k = self.scan_ident(k)?;
        while matches!(self.peek(k).kind, TokenKind::Dot) && self.peek(k + 1).kind.is_identifier_like()
        {
            k += 2;
        }
        Some(k)
    }

    fn scan_ident(&self, k: usize) -> Option<usize> {
        let kind = &self.peek(k).kind;
        if kind.is_identifier_like() {
            Some(k + 1)
        } else if matches!(kind, TokenKind::Dot)
            && matches!(self.peek(k + 1).kind, TokenKind::Identifier(_))
        {
            Some(k + 2)
        } else {
            None
        }
    }
}
