//! Source location tracking for expression parsing
//!
//! Expressions are single strings, so a location is a 1-based character
//! column. A span covers the columns of one lexeme; accurate spans are
//! essential for helpful error messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A span of source columns, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First column of the lexeme (1-based)
    pub start: usize,
    /// Last column of the lexeme (1-based, inclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Create a single-column span
    pub fn single(column: usize) -> Self {
        Self {
            start: column,
            end: column,
        }
    }

    /// Span of a lexeme starting at `start` with `len` characters
    pub fn of_lexeme(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len.max(1) - 1,
        }
    }

    /// Number of columns covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A span never covers zero columns
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check if this span contains a column
    pub fn contains(&self, column: usize) -> bool {
        column >= self.start && column <= self.end
    }

    /// Get the source text covered by this span
    pub fn slice(&self, source: &str) -> String {
        source.chars().skip(self.start - 1).take(self.len()).collect()
    }

    /// Format an error message with the source line and a caret underline
    pub fn format_error(&self, source: &str, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("Error: {}\n", message));
        result.push_str(&format!("  --> column {}\n", self.start));
        result.push_str("   |\n");
        result.push_str(&format!("   | {}\n", source));

        let mut underline = String::from("   | ");
        for _ in 1..self.start {
            underline.push(' ');
        }
        let caret_count = self.len().min(source.chars().count().saturating_sub(self.start - 1)).max(1);
        for _ in 0..caret_count {
            underline.push('^');
        }
        result.push_str(&underline);
        result.push('\n');

        result
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_display() {
        assert_eq!(Span::single(4).to_string(), "4");
        assert_eq!(Span::new(2, 5).to_string(), "2-5");
    }

    #[test]
    fn test_span_of_lexeme() {
        let span = Span::of_lexeme(3, 4);
        assert_eq!(span.start, 3);
        assert_eq!(span.end, 6);
        assert_eq!(span.len(), 4);

        // zero-length lexemes still occupy their start column
        assert_eq!(Span::of_lexeme(3, 0), Span::single(3));
    }

    #[test]
    fn test_span_slice() {
        let span = Span::new(3, 5);
        assert_eq!(span.slice("1 + 2"), "+ 2");
    }

    #[test]
    fn test_span_merge_and_contains() {
        let merged = Span::new(2, 4).merge(Span::new(7, 9));
        assert_eq!(merged, Span::new(2, 9));
        assert!(merged.contains(5));
        assert!(!merged.contains(1));
    }

    #[test]
    fn test_format_error_points_at_span() {
        let rendered = Span::new(3, 3).format_error("1 ++ 2", "Undefined operator '++'");
        assert!(rendered.contains("Undefined operator"));
        assert!(rendered.contains("--> column 3"));
        assert!(rendered.lines().last().unwrap().ends_with("^"));
    }
}
