//! Conversion of host data into evaluation values
//!
//! Embedders hand variable bindings to the engine as `serde_json::Value`,
//! the crate's host-interchange format; the configured converter turns them
//! into typed `EvaluationValue`s.

use crate::data::value::EvaluationValue;
use bigdecimal::BigDecimal;
use serde_json::Value;

/// Conversion failures surface the unconvertible input
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    #[error("Unsupported data type for value: {value}")]
    UnsupportedType { value: String },

    #[error("Number is not representable as a decimal: {value}")]
    UnrepresentableNumber { value: String },
}

/// Converts host data into an `EvaluationValue`
pub trait EvaluationValueConverter {
    fn convert(&self, raw: &Value) -> Result<EvaluationValue, ConversionError>;
}

/// The default converter: null, booleans, numbers, strings, and arrays map
/// onto their value-model counterparts; objects are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEvaluationValueConverter;

impl EvaluationValueConverter for DefaultEvaluationValueConverter {
    fn convert(&self, raw: &Value) -> Result<EvaluationValue, ConversionError> {
        match raw {
            Value::Null => Ok(EvaluationValue::Null),
            Value::Bool(value) => Ok(EvaluationValue::Boolean(*value)),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Ok(EvaluationValue::Number(BigDecimal::from(value)))
                } else if let Some(value) = number.as_u64() {
                    Ok(EvaluationValue::Number(BigDecimal::from(value)))
                } else if let Some(value) = number.as_f64() {
                    BigDecimal::try_from(value)
                        .map(EvaluationValue::Number)
                        .map_err(|_| ConversionError::UnrepresentableNumber {
                            value: number.to_string(),
                        })
                } else {
                    Err(ConversionError::UnrepresentableNumber {
                        value: number.to_string(),
                    })
                }
            }
            Value::String(value) => Ok(EvaluationValue::String(value.clone())),
            Value::Array(values) => values
                .iter()
                .map(|value| self.convert(value))
                .collect::<Result<Vec<_>, _>>()
                .map(EvaluationValue::Array),
            Value::Object(_) => Err(ConversionError::UnsupportedType {
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_conversions() {
        let converter = DefaultEvaluationValueConverter;
        assert_eq!(converter.convert(&json!(null)).unwrap(), EvaluationValue::Null);
        assert_eq!(
            converter.convert(&json!(true)).unwrap(),
            EvaluationValue::Boolean(true)
        );
        assert_eq!(
            converter.convert(&json!(42)).unwrap(),
            EvaluationValue::Number(BigDecimal::from(42))
        );
        assert_eq!(
            converter.convert(&json!("abc")).unwrap(),
            EvaluationValue::String("abc".to_string())
        );
    }

    #[test]
    fn test_array_conversion_recurses() {
        let converter = DefaultEvaluationValueConverter;
        let converted = converter.convert(&json!([1, "x", [false]])).unwrap();
        let values = converted.as_array().unwrap();
        assert_eq!(values.len(), 3);
        assert!(values[2].as_array().unwrap()[0].is_boolean());
    }

    #[test]
    fn test_objects_are_rejected() {
        let converter = DefaultEvaluationValueConverter;
        let error = converter.convert(&json!({"a": 1})).unwrap_err();
        assert!(matches!(error, ConversionError::UnsupportedType { .. }));
    }
}
