//! Lexical analysis: the context-sensitive expression tokenizer
//!
//! A [`Tokenizer`] is created per expression, bound to one configuration,
//! and consumed by exactly one [`Tokenizer::parse`] call.

pub mod error;
pub mod tokenizer;

pub use error::{messages, ParseError};
pub use tokenizer::Tokenizer;
