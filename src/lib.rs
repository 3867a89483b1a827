//! Time-Series Expression Engine
//!
//! An embeddable arithmetic/logical expression engine front end: a
//! context-sensitive tokenizer plus the configuration surface that binds
//! operator and function names to their semantic definitions. Downstream
//! stages (shunting-yard conversion and evaluation) consume the token list
//! this crate produces.

// ============================================================================
// PUBLIC API - High-Level Interface
// ============================================================================

/// Configuration system (dictionaries, builder, compile-time constants)
pub mod config;

/// Value model and data access
pub mod data;

/// Function definitions and the standard function set
pub mod functions;

/// Lexical analysis: tokenizer and parse errors
pub mod lexical;

/// Global structured logging
pub mod logging;

/// Operator definitions, fixity, and the precedence ladder
pub mod operators;

/// Token model
pub mod tokens;

/// Shared primitives (source spans)
pub mod utils;

// ============================================================================
// PUBLIC API - Core Types (Re-exports)
// ============================================================================

pub use config::{
    standard_constants, ExpressionConfiguration, ExpressionConfigurationBuilder, FunctionDictionary,
    MathContext, OperatorDictionary,
};
pub use data::{DataAccessor, EvaluationValue, TimeSeriesPoint};
pub use functions::{FunctionDefinition, FunctionParameter};
pub use lexical::{ParseError, Tokenizer};
pub use operators::{Associativity, Fixity, OperatorDefinition};
pub use tokens::{Token, TokenDefinition, TokenType};
pub use utils::Span;

// ============================================================================
// LIBRARY INFORMATION
// ============================================================================

/// Engine implementation version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the engine library.
///
/// Installs the global logging service; optional, but embedders that want
/// the engine's diagnostics should call it once at startup.
pub fn init() -> Result<(), String> {
    logging::init()
}
