//! Configuration system for the expression engine
//!
//! Compile-time constants, the operator and function dictionaries, and the
//! immutable per-engine configuration bundle with its builder.

pub mod configuration;
pub mod constants;
pub mod function_dictionary;
pub mod operator_dictionary;

pub use configuration::{
    standard_constants, ExpressionConfiguration, ExpressionConfigurationBuilder, MathContext,
};
pub use function_dictionary::{FunctionDictionary, MapBasedFunctionDictionary};
pub use operator_dictionary::{MapBasedOperatorDictionary, OperatorDictionary};
