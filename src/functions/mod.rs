//! Function definitions for the expression engine
//!
//! A function definition carries the parameter metadata the front end and
//! the downstream evaluator agree on: parameter order, variadic tail, lazy
//! evaluation, and numeric constraints. Function bodies are evaluator
//! territory and not part of this crate.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Declared metadata for a single function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    name: String,
    /// A variadic parameter absorbs all remaining arguments; only legal in
    /// the last position
    var_arg: bool,
    /// Lazy parameters are passed unevaluated (e.g. the result branches of IF)
    lazy: bool,
    /// The evaluator rejects zero arguments for this parameter
    non_zero: bool,
    /// The evaluator rejects negative arguments for this parameter
    non_negative: bool,
}

impl FunctionParameter {
    /// A plain required parameter
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            var_arg: false,
            lazy: false,
            non_zero: false,
            non_negative: false,
        }
    }

    /// A variadic tail parameter
    pub fn var_arg(name: &str) -> Self {
        Self {
            var_arg: true,
            ..Self::required(name)
        }
    }

    /// A lazily evaluated parameter
    pub fn lazy(name: &str) -> Self {
        Self {
            lazy: true,
            ..Self::required(name)
        }
    }

    pub fn with_non_zero(mut self) -> Self {
        self.non_zero = true;
        self
    }

    pub fn with_non_negative(mut self) -> Self {
        self.non_negative = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_var_arg(&self) -> bool {
        self.var_arg
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn is_non_zero(&self) -> bool {
        self.non_zero
    }

    pub fn is_non_negative(&self) -> bool {
        self.non_negative
    }
}

/// Metadata describing one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    parameters: Vec<FunctionParameter>,
}

impl FunctionDefinition {
    pub fn new(parameters: Vec<FunctionParameter>) -> Self {
        debug_assert!(
            parameters
                .iter()
                .position(|parameter| parameter.is_var_arg())
                .map(|index| index == parameters.len() - 1)
                .unwrap_or(true),
            "var-arg parameter must be last"
        );
        Self { parameters }
    }

    pub fn parameters(&self) -> &[FunctionParameter] {
        &self.parameters
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn has_var_args(&self) -> bool {
        self.parameters
            .last()
            .map(FunctionParameter::is_var_arg)
            .unwrap_or(false)
    }
}

/// The standard function set seeded into every default configuration.
///
/// Names are registered case-insensitively by the function dictionary.
pub fn standard_functions() -> Vec<(&'static str, Arc<FunctionDefinition>)> {
    vec![
        // basic functions
        (
            "ABS",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::required("value")])),
        ),
        (
            "CEILING",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::required("value")])),
        ),
        (
            "FACT",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("number").with_non_negative(),
            ])),
        ),
        (
            "FLOOR",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::required("value")])),
        ),
        (
            "IF",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("condition"),
                FunctionParameter::lazy("result_if_true"),
                FunctionParameter::lazy("result_if_false"),
            ])),
        ),
        (
            "LOG",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("value").with_non_zero().with_non_negative(),
            ])),
        ),
        (
            "LOG10",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("value").with_non_zero().with_non_negative(),
            ])),
        ),
        (
            "MAX",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::var_arg("value")])),
        ),
        (
            "MIN",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::var_arg("value")])),
        ),
        (
            "NOT",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::required("value")])),
        ),
        (
            "SUM",
            Arc::new(FunctionDefinition::new(vec![FunctionParameter::var_arg("value")])),
        ),
        (
            "SQRT",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("value").with_non_negative(),
            ])),
        ),
        // time-series functions
        (
            "MOVE",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("series"),
                FunctionParameter::required("periods"),
            ])),
        ),
        (
            "MA",
            Arc::new(FunctionDefinition::new(vec![
                FunctionParameter::required("series"),
                FunctionParameter::required("window").with_non_zero().with_non_negative(),
            ])),
        ),
    ]
}
