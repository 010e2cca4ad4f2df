//! Identifiers and dotted names.

use core::fmt;

use serde::Serialize;

use crate::lexer::{Keyword, Span};

/// A single identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ident {
    /// The identifier with quotes removed. A leading dot (as in `.kibana`)
    /// is kept as part of the value.
    pub value: String,
    /// Whether it was written in backticks.
    pub quoted: bool,
    /// Source span.
    pub span: Span,
}

impl Ident {
    /// Creates an unquoted identifier with an empty span.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
            span: Span::default(),
        }
    }

    /// Whether this identifier can be rendered without backticks and still
    /// lex and parse back as the same identifier.
    fn renders_bare(&self) -> bool {
        let body = self.value.strip_prefix('.').unwrap_or(&self.value);
        let mut chars = body.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        (first.is_alphabetic() || first == '_' || first == '@')
            && chars.all(|c| c.is_alphanumeric() || c == '_')
            && Keyword::from_str(body).is_none()
            && !is_contextual_word(body)
    }
}

/// Bare words that carry meaning in expression position.
fn is_contextual_word(word: &str) -> bool {
    const WORDS: &[&str] = &[
        "DIV",
        "MOD",
        "CURRENT_DATE",
        "CURRENT_TIME",
        "CURRENT_TIMESTAMP",
        "LOCALTIME",
        "LOCALTIMESTAMP",
        "UTC_DATE",
        "UTC_TIME",
        "UTC_TIMESTAMP",
    ];
    WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.renders_bare() {
            f.write_str(&self.value)
        } else {
            write!(f, "`{}`", self.value.replace('`', "``"))
        }
    }
}

/// A dot-separated name such as `logs.nested.field`.
///
/// Never empty, and no segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifiedName {
    /// The segments, in source order.
    pub parts: Vec<Ident>,
    /// Source span.
    pub span: Span,
}

impl QualifiedName {
    /// Builds a name from plain segments, with empty spans.
    #[must_use]
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Ident::new).collect(),
            span: Span::default(),
        }
    }

    /// The segments joined with dots, without any quoting.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.value.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
