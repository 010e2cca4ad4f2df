//! Lexer and token stream.
//!
//! The hand-written [`Lexer`] produces classified tokens; [`TokenStream`]
//! is the cursor the parser reads them through. Any other producer of
//! [`Token`]s can feed the parser via [`TokenStream::new`].

mod span;
mod stream;
mod token;
mod tokenizer;

pub use span::Span;
pub use stream::{Mark, TokenStream};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
