//! Expression configuration and its builder
//!
//! The configuration binds operator and function names to their semantic
//! definitions and carries the numeric, conversion, and feature settings an
//! expression is parsed and evaluated under. A configuration is immutable
//! once built; the additive `with_additional_*` methods consume the value
//! and return it, so fluent chaining works and no mutation can race a
//! `parse()` that reads the dictionaries (`&mut` exclusivity).

use crate::config::constants::compile_time::math;
use crate::config::function_dictionary::{FunctionDictionary, MapBasedFunctionDictionary};
use crate::config::operator_dictionary::{MapBasedOperatorDictionary, OperatorDictionary};
use crate::data::accessor::{DataAccessor, DataAccessorFactory, MapBasedDataAccessor};
use crate::data::conversion::{DefaultEvaluationValueConverter, EvaluationValueConverter};
use crate::data::value::EvaluationValue;
use crate::functions::{standard_functions, FunctionDefinition};
use crate::log_debug;
use crate::operators::{precedence, standard_operators, OperatorDefinition};
use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use chrono::FixedOffset;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Numeric precision and rounding for evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathContext {
    /// Significant digits kept by arithmetic operations
    pub precision: u64,
    /// Rounding applied when a result exceeds the precision
    pub rounding_mode: RoundingMode,
}

impl MathContext {
    pub fn new(precision: u64, rounding_mode: RoundingMode) -> Self {
        Self {
            precision,
            rounding_mode,
        }
    }
}

impl Default for MathContext {
    /// 68 digits, banker's rounding
    fn default() -> Self {
        Self::new(math::DEFAULT_PRECISION, RoundingMode::HalfEven)
    }
}

/// The standard constants available to every expression: `TRUE`, `FALSE`,
/// `PI`, `E`, and `NULL`. Keys are matched case-insensitively. The returned
/// snapshot is process-wide and never mutated.
pub fn standard_constants() -> &'static HashMap<String, EvaluationValue> {
    static STANDARD_CONSTANTS: OnceLock<HashMap<String, EvaluationValue>> = OnceLock::new();
    STANDARD_CONSTANTS.get_or_init(|| {
        let mut constants = HashMap::new();
        constants.insert("TRUE".to_string(), EvaluationValue::Boolean(true));
        constants.insert("FALSE".to_string(), EvaluationValue::Boolean(false));
        constants.insert(
            "PI".to_string(),
            EvaluationValue::Number(
                BigDecimal::from_str(math::PI).expect("PI digits are a valid decimal"),
            ),
        );
        constants.insert(
            "E".to_string(),
            EvaluationValue::Number(
                BigDecimal::from_str(math::E).expect("E digits are a valid decimal"),
            ),
        );
        constants.insert("NULL".to_string(), EvaluationValue::Null);
        constants
    })
}

/// The immutable bundle of everything expression parsing and evaluation is
/// configured by. Create one with [`ExpressionConfiguration::builder`] or
/// [`ExpressionConfiguration::default_configuration`].
pub struct ExpressionConfiguration {
    operator_dictionary: Box<dyn OperatorDictionary + Send + Sync>,
    function_dictionary: Box<dyn FunctionDictionary + Send + Sync>,
    math_context: MathContext,
    data_accessor_factory: DataAccessorFactory,
    default_constants: HashMap<String, EvaluationValue>,
    arrays_allowed: bool,
    vars_allowed: bool,
    implicit_multiplication_allowed: bool,
    power_of_precedence: i32,
    decimal_places_rounding: i32,
    strip_trailing_zeros: bool,
    allow_overwrite_constants: bool,
    zone_id: FixedOffset,
    value_converter: Arc<dyn EvaluationValueConverter + Send + Sync>,
}

impl ExpressionConfiguration {
    /// Start building a custom configuration
    pub fn builder() -> ExpressionConfigurationBuilder {
        ExpressionConfigurationBuilder::default()
    }

    /// Convenience method to create a configuration with default settings
    pub fn default_configuration() -> Self {
        Self::builder().build()
    }

    pub fn operator_dictionary(&self) -> &(dyn OperatorDictionary + Send + Sync) {
        self.operator_dictionary.as_ref()
    }

    pub fn function_dictionary(&self) -> &(dyn FunctionDictionary + Send + Sync) {
        self.function_dictionary.as_ref()
    }

    pub fn math_context(&self) -> MathContext {
        self.math_context
    }

    /// Create the per-expression data accessor
    pub fn new_data_accessor(&self) -> Box<dyn DataAccessor> {
        (self.data_accessor_factory)()
    }

    pub fn default_constants(&self) -> &HashMap<String, EvaluationValue> {
        &self.default_constants
    }

    /// Case-insensitive constant lookup
    pub fn get_default_constant(&self, name: &str) -> Option<&EvaluationValue> {
        self.default_constants.get(&name.to_uppercase())
    }

    pub fn is_arrays_allowed(&self) -> bool {
        self.arrays_allowed
    }

    pub fn is_vars_allowed(&self) -> bool {
        self.vars_allowed
    }

    pub fn is_implicit_multiplication_allowed(&self) -> bool {
        self.implicit_multiplication_allowed
    }

    pub fn power_of_precedence(&self) -> i32 {
        self.power_of_precedence
    }

    pub fn decimal_places_rounding(&self) -> i32 {
        self.decimal_places_rounding
    }

    pub fn is_strip_trailing_zeros(&self) -> bool {
        self.strip_trailing_zeros
    }

    pub fn is_allow_overwrite_constants(&self) -> bool {
        self.allow_overwrite_constants
    }

    pub fn zone_id(&self) -> FixedOffset {
        self.zone_id
    }

    pub fn value_converter(&self) -> &(dyn EvaluationValueConverter + Send + Sync) {
        self.value_converter.as_ref()
    }

    /// Register an operator directly
    pub fn add_operator(&mut self, name: &str, definition: Arc<OperatorDefinition>) {
        self.operator_dictionary.add_operator(name, definition);
    }

    /// Register a function directly
    pub fn add_function(&mut self, name: &str, definition: Arc<FunctionDefinition>) {
        self.function_dictionary.add_function(name, definition);
    }

    /// Adds additional operators to this configuration, in entry order.
    ///
    /// Returns the configuration to allow chaining:
    /// ```
    /// use std::sync::Arc;
    /// use tse_engine::config::ExpressionConfiguration;
    /// use tse_engine::operators::{precedence, OperatorDefinition};
    ///
    /// let config = ExpressionConfiguration::default_configuration()
    ///     .with_additional_operators(vec![
    ///         ("**", Arc::new(OperatorDefinition::prefix(precedence::OPERATOR_PRECEDENCE_UNARY))),
    ///     ]);
    /// ```
    pub fn with_additional_operators(
        mut self,
        operators: Vec<(&str, Arc<OperatorDefinition>)>,
    ) -> Self {
        for (name, definition) in operators {
            log_debug!("Registering additional operator", "name" => name);
            self.operator_dictionary.add_operator(name, definition);
        }
        self
    }

    /// Adds additional functions to this configuration, in entry order.
    /// Returns the configuration to allow chaining.
    pub fn with_additional_functions(
        mut self,
        functions: Vec<(&str, Arc<FunctionDefinition>)>,
    ) -> Self {
        for (name, definition) in functions {
            log_debug!("Registering additional function", "name" => name);
            self.function_dictionary.add_function(name, definition);
        }
        self
    }
}

impl fmt::Debug for ExpressionConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionConfiguration")
            .field("math_context", &self.math_context)
            .field("arrays_allowed", &self.arrays_allowed)
            .field("vars_allowed", &self.vars_allowed)
            .field(
                "implicit_multiplication_allowed",
                &self.implicit_multiplication_allowed,
            )
            .field("power_of_precedence", &self.power_of_precedence)
            .field("decimal_places_rounding", &self.decimal_places_rounding)
            .field("strip_trailing_zeros", &self.strip_trailing_zeros)
            .field("allow_overwrite_constants", &self.allow_overwrite_constants)
            .field("zone_id", &self.zone_id)
            .finish_non_exhaustive()
    }
}

/// Value builder for [`ExpressionConfiguration`]; every unset field takes
/// its documented default.
#[derive(Default)]
pub struct ExpressionConfigurationBuilder {
    operator_dictionary: Option<Box<dyn OperatorDictionary + Send + Sync>>,
    function_dictionary: Option<Box<dyn FunctionDictionary + Send + Sync>>,
    math_context: Option<MathContext>,
    data_accessor_factory: Option<DataAccessorFactory>,
    default_constants: Option<HashMap<String, EvaluationValue>>,
    arrays_allowed: Option<bool>,
    vars_allowed: Option<bool>,
    implicit_multiplication_allowed: Option<bool>,
    power_of_precedence: Option<i32>,
    decimal_places_rounding: Option<i32>,
    strip_trailing_zeros: Option<bool>,
    allow_overwrite_constants: Option<bool>,
    zone_id: Option<FixedOffset>,
    value_converter: Option<Arc<dyn EvaluationValueConverter + Send + Sync>>,
}

impl ExpressionConfigurationBuilder {
    pub fn operator_dictionary(
        mut self,
        dictionary: Box<dyn OperatorDictionary + Send + Sync>,
    ) -> Self {
        self.operator_dictionary = Some(dictionary);
        self
    }

    pub fn function_dictionary(
        mut self,
        dictionary: Box<dyn FunctionDictionary + Send + Sync>,
    ) -> Self {
        self.function_dictionary = Some(dictionary);
        self
    }

    pub fn math_context(mut self, math_context: MathContext) -> Self {
        self.math_context = Some(math_context);
        self
    }

    pub fn data_accessor_factory(mut self, factory: DataAccessorFactory) -> Self {
        self.data_accessor_factory = Some(factory);
        self
    }

    /// Replace the default constants map; keys are normalized to uppercase
    /// so lookup stays case-insensitive
    pub fn default_constants(mut self, constants: HashMap<String, EvaluationValue>) -> Self {
        self.default_constants = Some(
            constants
                .into_iter()
                .map(|(name, value)| (name.to_uppercase(), value))
                .collect(),
        );
        self
    }

    pub fn arrays_allowed(mut self, allowed: bool) -> Self {
        self.arrays_allowed = Some(allowed);
        self
    }

    pub fn vars_allowed(mut self, allowed: bool) -> Self {
        self.vars_allowed = Some(allowed);
        self
    }

    pub fn implicit_multiplication_allowed(mut self, allowed: bool) -> Self {
        self.implicit_multiplication_allowed = Some(allowed);
        self
    }

    pub fn power_of_precedence(mut self, precedence: i32) -> Self {
        self.power_of_precedence = Some(precedence);
        self
    }

    pub fn decimal_places_rounding(mut self, decimal_places: i32) -> Self {
        self.decimal_places_rounding = Some(decimal_places);
        self
    }

    pub fn strip_trailing_zeros(mut self, strip: bool) -> Self {
        self.strip_trailing_zeros = Some(strip);
        self
    }

    pub fn allow_overwrite_constants(mut self, allow: bool) -> Self {
        self.allow_overwrite_constants = Some(allow);
        self
    }

    pub fn zone_id(mut self, zone_id: FixedOffset) -> Self {
        self.zone_id = Some(zone_id);
        self
    }

    pub fn value_converter(
        mut self,
        converter: Arc<dyn EvaluationValueConverter + Send + Sync>,
    ) -> Self {
        self.value_converter = Some(converter);
        self
    }

    pub fn build(self) -> ExpressionConfiguration {
        let configuration = ExpressionConfiguration {
            operator_dictionary: self.operator_dictionary.unwrap_or_else(|| {
                Box::new(MapBasedOperatorDictionary::of_operators(standard_operators()))
            }),
            function_dictionary: self.function_dictionary.unwrap_or_else(|| {
                Box::new(MapBasedFunctionDictionary::of_functions(standard_functions()))
            }),
            math_context: self.math_context.unwrap_or_default(),
            data_accessor_factory: self.data_accessor_factory.unwrap_or_else(|| {
                Arc::new(|| Box::new(MapBasedDataAccessor::new()) as Box<dyn DataAccessor>)
            }),
            default_constants: self
                .default_constants
                .unwrap_or_else(|| standard_constants().clone()),
            arrays_allowed: self.arrays_allowed.unwrap_or(true),
            vars_allowed: self.vars_allowed.unwrap_or(true),
            implicit_multiplication_allowed: self.implicit_multiplication_allowed.unwrap_or(true),
            power_of_precedence: self
                .power_of_precedence
                .unwrap_or(precedence::OPERATOR_PRECEDENCE_POWER),
            decimal_places_rounding: self
                .decimal_places_rounding
                .unwrap_or(math::DECIMAL_PLACES_ROUNDING_UNLIMITED),
            strip_trailing_zeros: self.strip_trailing_zeros.unwrap_or(true),
            allow_overwrite_constants: self.allow_overwrite_constants.unwrap_or(true),
            zone_id: self.zone_id.unwrap_or_else(host_zone_offset),
            value_converter: self
                .value_converter
                .unwrap_or_else(|| Arc::new(DefaultEvaluationValueConverter)),
        };

        crate::log_success!(
            crate::logging::codes::success::CONFIGURATION_BUILT,
            "Expression configuration built",
            "arrays_allowed" => configuration.arrays_allowed,
            "precision" => configuration.math_context.precision,
            "power_of_precedence" => configuration.power_of_precedence
        );

        configuration
    }
}

/// The host's current UTC offset
fn host_zone_offset() -> FixedOffset {
    *chrono::Local::now().offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::FunctionParameter;

    fn one_arg_function() -> Arc<FunctionDefinition> {
        Arc::new(FunctionDefinition::new(vec![FunctionParameter::required("value")]))
    }

    #[test]
    fn test_default_configuration_values() {
        let config = ExpressionConfiguration::default_configuration();

        assert_eq!(config.math_context(), MathContext::new(68, RoundingMode::HalfEven));
        assert!(config.is_arrays_allowed());
        assert!(config.is_vars_allowed());
        assert!(config.is_implicit_multiplication_allowed());
        assert!(config.is_strip_trailing_zeros());
        assert!(config.is_allow_overwrite_constants());
        assert_eq!(
            config.decimal_places_rounding(),
            math::DECIMAL_PLACES_ROUNDING_UNLIMITED
        );
        assert_eq!(
            config.power_of_precedence(),
            precedence::OPERATOR_PRECEDENCE_POWER
        );
    }

    #[test]
    fn test_default_dictionaries_are_seeded() {
        let config = ExpressionConfiguration::default_configuration();

        assert!(config.operator_dictionary().has_infix_operator("&&"));
        assert!(config.operator_dictionary().has_prefix_operator("-"));
        assert!(config.function_dictionary().has_function("sqrt"));
        assert!(config.function_dictionary().has_function("MA"));
        assert!(config.function_dictionary().has_function("move"));
    }

    #[test]
    fn test_standard_constants_lookup_is_case_insensitive() {
        let config = ExpressionConfiguration::default_configuration();

        assert_eq!(
            config.get_default_constant("true"),
            Some(&EvaluationValue::Boolean(true))
        );
        assert_eq!(config.get_default_constant("Null"), Some(&EvaluationValue::Null));
        assert!(config.get_default_constant("PI").unwrap().is_number());
        assert_eq!(config.get_default_constant("TAU"), None);
    }

    #[test]
    fn test_with_additional_functions_chains() {
        let config = ExpressionConfiguration::default_configuration()
            .with_additional_functions(vec![("SAVE", one_arg_function())])
            .with_additional_functions(vec![("UPDATE", one_arg_function())]);

        assert!(config.function_dictionary().has_function("save"));
        assert!(config.function_dictionary().has_function("update"));
        assert!(config.function_dictionary().has_function("SUM"));
    }

    #[test]
    fn test_with_additional_functions_is_idempotent() {
        let config = ExpressionConfiguration::default_configuration()
            .with_additional_functions(vec![("SAVE", one_arg_function())])
            .with_additional_functions(vec![("SAVE", one_arg_function())]);

        let definition = config.function_dictionary().get_function("save").unwrap();
        assert_eq!(definition.parameter_count(), 1);
    }

    #[test]
    fn test_with_additional_operators_extends_partitions() {
        let config = ExpressionConfiguration::default_configuration().with_additional_operators(vec![
            (
                "++",
                Arc::new(OperatorDefinition::prefix(precedence::OPERATOR_PRECEDENCE_UNARY)),
            ),
            (
                "++",
                Arc::new(OperatorDefinition::postfix(precedence::OPERATOR_PRECEDENCE_UNARY)),
            ),
        ]);

        assert!(config.operator_dictionary().has_prefix_operator("++"));
        assert!(config.operator_dictionary().has_postfix_operator("++"));
        assert!(!config.operator_dictionary().has_infix_operator("++"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ExpressionConfiguration::builder()
            .arrays_allowed(false)
            .decimal_places_rounding(2)
            .math_context(MathContext::new(32, RoundingMode::HalfUp))
            .power_of_precedence(precedence::OPERATOR_PRECEDENCE_POWER_HIGHER)
            .build();

        assert!(!config.is_arrays_allowed());
        assert_eq!(config.decimal_places_rounding(), 2);
        assert_eq!(config.math_context().precision, 32);
        assert_eq!(
            config.power_of_precedence(),
            precedence::OPERATOR_PRECEDENCE_POWER_HIGHER
        );
    }

    #[test]
    fn test_custom_default_constants_are_normalized() {
        let mut constants = HashMap::new();
        constants.insert("answer".to_string(), EvaluationValue::from(42));

        let config = ExpressionConfiguration::builder()
            .default_constants(constants)
            .build();

        assert_eq!(
            config.get_default_constant("ANSWER"),
            Some(&EvaluationValue::from(42))
        );
        assert_eq!(config.get_default_constant("PI"), None);
    }

    #[test]
    fn test_data_accessor_factory_returns_fresh_storage() {
        let config = ExpressionConfiguration::default_configuration();

        let mut first = config.new_data_accessor();
        first.set_data("x", EvaluationValue::from(1));

        let second = config.new_data_accessor();
        assert_eq!(second.get_data("x"), None);
    }
}
