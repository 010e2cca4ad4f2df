//! Token types produced by the lexer and consumed by the parser.

use core::fmt;

use serde::Serialize;

use super::Span;

/// Reserved words of the dialect.
///
/// Function names (`ABS`, `MATCH`, `COUNT`, ...), date/time units and cast
/// target names are *not* keywords: they lex as identifiers and the parser
/// classifies them by spelling where the grammar asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    // Query structure
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    As,
    All,
    Distinct,

    // Ordering
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Logical and predicate operators
    And,
    Or,
    Not,
    Is,
    Null,
    True,
    False,
    Between,
    Like,
    Regexp,
    In,

    // Specific functions
    Case,
    When,
    Then,
    Else,
    End,
    Cast,

    // Window and aggregate clauses
    Over,
    Partition,
    Filter,

    // Admin statements
    Show,
    Describe,
    Tables,
    Columns,

    // Date/time literals
    Interval,
    Date,
    Time,
    Timestamp,
    Datetime,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "AS" => Some(Self::As),
            "ALL" => Some(Self::All),
            "DISTINCT" => Some(Self::Distinct),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "NULLS" => Some(Self::Nulls),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IS" => Some(Self::Is),
            "NULL" => Some(Self::Null),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "BETWEEN" => Some(Self::Between),
            "LIKE" => Some(Self::Like),
            "REGEXP" => Some(Self::Regexp),
            "IN" => Some(Self::In),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "CAST" => Some(Self::Cast),
            "OVER" => Some(Self::Over),
            "PARTITION" => Some(Self::Partition),
            "FILTER" => Some(Self::Filter),
            "SHOW" => Some(Self::Show),
            "DESCRIBE" => Some(Self::Describe),
            "TABLES" => Some(Self::Tables),
            "COLUMNS" => Some(Self::Columns),
            "INTERVAL" => Some(Self::Interval),
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "TIMESTAMP" => Some(Self::Timestamp),
            "DATETIME" => Some(Self::Datetime),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::As => "AS",
            Self::All => "ALL",
            Self::Distinct => "DISTINCT",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Regexp => "REGEXP",
            Self::In => "IN",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Filter => "FILTER",
            Self::Show => "SHOW",
            Self::Describe => "DESCRIBE",
            Self::Tables => "TABLES",
            Self::Columns => "COLUMNS",
            Self::Interval => "INTERVAL",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Datetime => "DATETIME",
        }
    }

    /// Keywords the grammar also accepts wherever an identifier is expected.
    #[must_use]
    pub const fn can_be_identifier(&self) -> bool {
        matches!(
            self,
            Self::First
                | Self::Last
                | Self::Tables
                | Self::Columns
                | Self::Date
                | Self::Time
                | Self::Timestamp
                | Self::Datetime
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // Literals. Numeric values are interpreted by the parser from the
    // token text so that a bad literal can be reported as a node error.
    /// Integer literal (e.g. `42`).
    Decimal,
    /// Real literal (e.g. `3.14`, `1e10`).
    Real,
    /// Quoted string, unescaped (`'it''s'` or `"text"`).
    String(String),

    // Identifiers and keywords
    /// Bare identifier (e.g. `column_name`, `@timestamp`).
    Identifier(String),
    /// Backtick-quoted identifier, unescaped.
    QuotedIdentifier(String),
    /// Reserved word.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ^ (field boost in multi-field relevance functions)
    Caret,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown input, with a description.
    Error(String),
}

impl TokenKind {
    /// Returns true for any identifier-like token: bare or quoted
    /// identifiers, and keywords usable as identifiers.
    #[must_use]
    pub const fn is_identifier_like(&self) -> bool {
        match self {
            Self::Identifier(_) | Self::QuotedIdentifier(_) => true,
            Self::Keyword(kw) => kw.can_be_identifier(),
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => f.write_str("integer literal"),
            Self::Real => f.write_str("real literal"),
            Self::String(s) => write!(f, "string '{s}'"),
            Self::Identifier(name) => write!(f, "identifier {name}"),
            Self::QuotedIdentifier(name) => write!(f, "identifier `{name}`"),
            Self::Keyword(kw) => write!(f, "keyword {}", kw.as_str()),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Percent => f.write_str("'%'"),
            Self::Eq => f.write_str("'='"),
            Self::NotEq => f.write_str("'!='"),
            Self::Lt => f.write_str("'<'"),
            Self::LtEq => f.write_str("'<='"),
            Self::Gt => f.write_str("'>'"),
            Self::GtEq => f.write_str("'>='"),
            Self::Caret => f.write_str("'^'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::LeftBracket => f.write_str("'['"),
            Self::RightBracket => f.write_str("']'"),
            Self::LeftBrace => f.write_str("'{'"),
            Self::RightBrace => f.write_str("'}'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(message) => write!(f, "invalid input ({message})"),
        }
    }
}

/// A classified token: its kind, the exact source text and where it sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The lexeme as written in the source.
    pub text: String,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// The EOF sentinel at `offset`.
    #[must_use]
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", Span::point(offset))
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this is an unquoted identifier spelled `word`
    /// (case-insensitive). Used for contextual words such as `DIV`, `MOD`
    /// and date/time units.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    /// The upper-cased spelling of a bare identifier, if this is one.
    #[must_use]
    pub fn bare_word(&self) -> Option<String> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name.to_ascii_uppercase()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("regexp"), Some(Keyword::Regexp));
        assert_eq!(Keyword::from_str("DeScRiBe"), Some(Keyword::Describe));
        assert_eq!(Keyword::from_str("match"), None);
        assert_eq!(Keyword::from_str("count"), None);
    }

    #[test]
    fn test_keyword_round_trips_through_as_str() {
        for kw in [
            Keyword::Select,
            Keyword::Partition,
            Keyword::Filter,
            Keyword::Interval,
            Keyword::Datetime,
        ] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_keywords_usable_as_identifiers() {
        assert!(Keyword::Date.can_be_identifier());
        assert!(Keyword::First.can_be_identifier());
        assert!(!Keyword::Select.can_be_identifier());
        assert!(!Keyword::Filter.can_be_identifier());
        assert!(TokenKind::Keyword(Keyword::Tables).is_identifier_like());
        assert!(!TokenKind::Keyword(Keyword::Where).is_identifier_like());
    }

    #[test]
    fn test_token_is_word() {
        let token = Token::new(
            TokenKind::Identifier(String::from("div")),
            "div",
            Span::new(0, 3),
        );
        assert!(token.is_word("DIV"));
        assert!(!token.is_word("MOD"));

        let quoted = Token::new(
            TokenKind::QuotedIdentifier(String::from("div")),
            "`div`",
            Span::new(0, 5),
        );
        assert!(!quoted.is_word("DIV"));
    }

    #[test]
    fn test_token_eof() {
        let eof = Token::eof(12);
        assert!(eof.is_eof());
        assert_eq!(eof.span, Span::point(12));
        assert_eq!(eof.as_keyword(), None);
    }
}
