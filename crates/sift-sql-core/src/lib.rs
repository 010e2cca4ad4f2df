//! # sift-sql-core
//!
//! Parser for a search-engine SQL dialect: `SELECT` queries with
//! full-text relevance functions, window and filtered aggregates, and the
//! `SHOW`/`DESCRIBE` metadata statements.
//!
//! This crate provides:
//! - A lexer producing spanned tokens
//! - A recursive descent parser that recovers from syntax errors and keeps
//!   going, collecting every diagnostic
//! - A typed AST that renders back to canonical SQL
//!
//! ```rust
//! use sift_sql_core::{parse, Statement};
//!
//! let outcome = parse("SELECT name FROM logs WHERE match(message, 'timeout') LIMIT 10");
//! assert!(outcome.is_clean());
//! let Some(Statement::Select(query)) = outcome.statement else {
//!     panic!("expected a query");
//! };
//! assert_eq!(query.limit.map(|l| l.limit), Some(10));
//! ```
//!
//! Broken input still produces a partial tree:
//!
//! ```rust
//! use sift_sql_core::parse;
//!
//! let outcome = parse("SELECT FROM logs");
//! assert!(!outcome.diagnostics.is_empty());
//! assert!(outcome.statement.is_some());
//! ```

pub mod ast;
pub mod config;
pub mod lexer;
pub mod parser;

pub use ast::{Expression, Statement};
pub use config::{ConfigError, ParserConfig, MAX_DEPTH_CEILING};
pub use lexer::{Lexer, Span, Token, TokenKind, TokenStream};
pub use parser::{ErrorListener, LoggingListener, ParseError, ParseErrorKind, ParseOutcome, Parser};

/// Parses `sql` with the default configuration.
#[must_use]
pub fn parse(sql: &str) -> ParseOutcome {
    Parser::new(sql).parse()
}
