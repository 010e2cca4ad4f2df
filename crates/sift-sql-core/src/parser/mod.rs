//! SQL Parser
//!
//! A hand-written recursive descent parser with precedence climbing over
//! three operator ladders, bounded lookahead with speculative fallback, and
//! clause-level error recovery.

mod error;
mod expression;
mod function;
mod literal;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod resolver;
mod vocabulary;

pub use error::{ErrorListener, LoggingListener, ParseError, ParseErrorKind};
pub use parser::{ParseOutcome, Parser};
