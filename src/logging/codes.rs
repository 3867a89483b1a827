//! Consolidated event codes and classification system
//!
//! Single source of truth for all event codes and their metadata. Codes are
//! stable identifiers: log consumers key on them, so renumbering is a
//! breaking change.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an event code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

// ============================================================================
// EVENT CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Tokenizer error codes
pub mod lexical {
    use super::Code;

    pub const TOKENIZATION_FAILED: Code = Code::new("E100");
    pub const UNDEFINED_OPERATOR: Code = Code::new("E101");
    pub const UNDEFINED_FUNCTION: Code = Code::new("E102");
    pub const UNBALANCED_DELIMITER: Code = Code::new("E103");
    pub const MALFORMED_LITERAL: Code = Code::new("E104");
    pub const MISPLACED_TOKEN: Code = Code::new("E105");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const INVALID_PREFERENCE: Code = Code::new("E120");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("S001");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("S100");
    pub const CONFIGURATION_BUILT: Code = Code::new("S120");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static CODE_REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        let entries = [
            CodeMetadata {
                code: "ERR001",
                category: "system",
                severity: Severity::Critical,
                description: "Internal engine error",
            },
            CodeMetadata {
                code: "ERR002",
                category: "system",
                severity: Severity::Critical,
                description: "Logging or configuration initialization failed",
            },
            CodeMetadata {
                code: "E100",
                category: "lexical",
                severity: Severity::High,
                description: "Expression could not be tokenized",
            },
            CodeMetadata {
                code: "E101",
                category: "lexical",
                severity: Severity::High,
                description: "Operator lexeme not present in the operator dictionary",
            },
            CodeMetadata {
                code: "E102",
                category: "lexical",
                severity: Severity::High,
                description: "Identifier followed by '(' is not a registered function",
            },
            CodeMetadata {
                code: "E103",
                category: "lexical",
                severity: Severity::High,
                description: "Unbalanced brace, array, or var delimiter",
            },
            CodeMetadata {
                code: "E104",
                category: "lexical",
                severity: Severity::High,
                description: "Malformed number or string literal",
            },
            CodeMetadata {
                code: "E105",
                category: "lexical",
                severity: Severity::High,
                description: "Token not allowed in its context",
            },
            CodeMetadata {
                code: "E120",
                category: "config",
                severity: Severity::Medium,
                description: "Unusable runtime preference value",
            },
            CodeMetadata {
                code: "S001",
                category: "success",
                severity: Severity::Low,
                description: "Global logging system initialized",
            },
            CodeMetadata {
                code: "S100",
                category: "success",
                severity: Severity::Low,
                description: "Expression tokenized successfully",
            },
            CodeMetadata {
                code: "S120",
                category: "success",
                severity: Severity::Low,
                description: "Expression configuration built",
            },
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

/// Get the description for a code, or a placeholder for unknown codes
pub fn get_description(code: &str) -> &'static str {
    registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown code")
}

/// Get the severity for a code; unknown codes are treated as High
pub fn get_severity(code: &str) -> Severity {
    registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::High)
}

/// Get the category for a code
pub fn get_category(code: &str) -> &'static str {
    registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("unknown")
}
