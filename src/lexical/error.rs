//! Parse errors with source positions
//!
//! The message strings are part of the engine's external interface; log
//! consumers and embedders match on them, so they must not drift.

use crate::tokens::Token;
use crate::utils::Span;
use serde::Serialize;

/// The exact error message surface of the tokenizer
pub mod messages {
    pub const CLOSING_BRACE_NOT_FOUND: &str = "Closing brace not found";
    pub const CLOSING_ARRAY_NOT_FOUND: &str = "Closing array not found";
    pub const CLOSING_VAR_NOT_FOUND: &str = "Closing var not found";
    pub const UNEXPECTED_CLOSING_BRACE: &str = "Unexpected closing brace";
    pub const UNEXPECTED_CLOSING_ARRAY: &str = "Unexpected closing array";
    pub const ARRAY_CLOSE_NOT_ALLOWED_HERE: &str = "Array close not allowed here";
    pub const UNEXPECTED_TOKEN_AFTER_INFIX_OPERATOR: &str =
        "Unexpected token after infix operator";
    pub const ILLEGAL_SCIENTIFIC_FORMAT: &str = "Illegal scientific format";
    pub const CLOSING_QUOTE_NOT_FOUND: &str = "Closing quote not found";
    pub const UNKNOWN_ESCAPE_CHARACTER: &str = "Unknown escape character";

    pub fn undefined_operator(lexeme: &str) -> String {
        format!("Undefined operator '{}'", lexeme)
    }

    pub fn undefined_function(name: &str) -> String {
        format!("Undefined function '{}'", name)
    }
}

/// A fatal tokenization error.
///
/// Columns are 1-based and inclusive; `end_column` equals `start_column`
/// for single-character errors. The `lexeme` is the offending source text
/// (possibly empty, or the whole expression for end-of-input balance
/// errors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at {start_column}:{end_column}")]
pub struct ParseError {
    pub start_column: usize,
    pub end_column: usize,
    pub lexeme: String,
    pub message: String,
}

impl ParseError {
    pub fn new(
        start_column: usize,
        end_column: usize,
        lexeme: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            start_column,
            end_column,
            lexeme: lexeme.into(),
            message: message.into(),
        }
    }

    /// An error located at an already-built token
    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        let span = token.span();
        Self::new(span.start, span.end, token.value(), message)
    }

    /// An end-of-input error that covers the whole expression
    pub fn of_expression(source: &str, message: impl Into<String>) -> Self {
        Self::new(1, source.chars().count().max(1), source, message)
    }

    /// Columns covered by the error
    pub fn span(&self) -> Span {
        Span::new(self.start_column, self.end_column.max(self.start_column))
    }

    /// Render the error with the source line and a caret underline
    pub fn format_with_source(&self, source: &str) -> String {
        self.span().format_error(source, &self.message)
    }
}
