//! Positioned, peekable token sequence with checkpoints.

use super::{Span, Token};

/// A saved cursor position, used to backtrack out of a speculative parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// The parser's view of the token sequence.
///
/// The stream always ends in an EOF sentinel; peeking or advancing past
/// the end keeps returning it.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Wraps `tokens`, appending an EOF sentinel if the producer did not.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(end));
        }
        Self { tokens, pos: 0 }
    }

    /// The token `k` positions ahead of the cursor (`0` is the current one).
    #[must_use]
    pub fn peek(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + k).min(last)]
    }

    /// Consumes the current token and returns it. Never moves past EOF.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if !self.tokens[index].is_eof() {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    #[must_use]
    pub const fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    /// Moves the cursor back to a previously saved position.
    pub fn reset(&mut self, mark: Mark) {
        debug_assert!(mark.0 <= self.pos, "reset may only move backwards");
        self.pos = mark.0;
    }

    /// Index of the current token.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Span of the most recently consumed token, or an empty span at the
    /// start of input if nothing has been consumed yet.
    #[must_use]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(index) => self.tokens[index].span,
            None => Span::point(self.tokens[0].span.start),
        }
    }

    /// All tokens, EOF included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TokenKind};

    fn stream(sql: &str) -> TokenStream {
        TokenStream::new(Lexer::new(sql).tokenize())
    }

    #[test]
    fn test_peek_past_end_returns_eof() {
        let s = stream("a");
        assert!(matches!(s.peek(0).kind, TokenKind::Identifier(_)));
        assert!(s.peek(1).is_eof());
        assert!(s.peek(10).is_eof());
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut s = stream("a");
        s.advance();
        assert!(s.advance().is_eof());
        assert!(s.advance().is_eof());
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn test_mark_and_reset() {
        let mut s = stream("a , b");
        let mark = s.mark();
        s.advance();
        s.advance();
        assert!(matches!(s.peek(0).kind, TokenKind::Identifier(_)));
        s.reset(mark);
        assert_eq!(s.position(), 0);
        assert_eq!(s.peek(0).text, "a");
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let tokens = vec![Token::new(
            TokenKind::Identifier(String::from("a")),
            "a",
            Span::new(0, 1),
        )];
        let s = TokenStream::new(tokens);
        assert_eq!(s.tokens().len(), 2);
        assert_eq!(s.peek(1).span, Span::point(1));
    }

    #[test]
    fn test_previous_span() {
        let mut s = stream("ab cd");
        assert_eq!(s.previous_span(), Span::point(0));
        s.advance();
        assert_eq!(s.previous_span(), Span::new(0, 2));
    }
}
