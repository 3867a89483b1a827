//! Shared primitive types for the expression front end
//!
//! Source-location tracking used by the tokenizer and error reporting.

pub mod span;

pub use span::Span;
