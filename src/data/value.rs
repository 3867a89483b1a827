//! The typed value produced and consumed by expression evaluation

use crate::data::time_series::TimeSeriesPoint;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed evaluation value.
///
/// Numbers are arbitrary-precision decimals; precision and rounding are
/// governed by the configuration's math context at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvaluationValue {
    Number(BigDecimal),
    String(String),
    Boolean(bool),
    Array(Vec<EvaluationValue>),
    TimeSeriesPoint(TimeSeriesPoint),
    Null,
}

impl EvaluationValue {
    pub fn number(value: BigDecimal) -> Self {
        Self::Number(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    pub fn array(values: Vec<EvaluationValue>) -> Self {
        Self::Array(values)
    }

    pub fn time_series_point(point: TimeSeriesPoint) -> Self {
        Self::TimeSeriesPoint(point)
    }

    pub fn null() -> Self {
        Self::Null
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_time_series_point(&self) -> bool {
        matches!(self, Self::TimeSeriesPoint(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_number(&self) -> Option<&BigDecimal> {
        match self {
            Self::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[EvaluationValue]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_time_series_point(&self) -> Option<&TimeSeriesPoint> {
        match self {
            Self::TimeSeriesPoint(point) => Some(point),
            _ => None,
        }
    }

    /// Name of the value's type, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "NUMBER",
            Self::String(_) => "STRING",
            Self::Boolean(_) => "BOOLEAN",
            Self::Array(_) => "ARRAY",
            Self::TimeSeriesPoint(_) => "TIME_SERIES_POINT",
            Self::Null => "NULL",
        }
    }
}

impl fmt::Display for EvaluationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "{}", value),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Array(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Self::TimeSeriesPoint(point) => write!(f, "{}", point),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<BigDecimal> for EvaluationValue {
    fn from(value: BigDecimal) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for EvaluationValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for EvaluationValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for EvaluationValue {
    fn from(value: i64) -> Self {
        Self::Number(BigDecimal::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_predicates_and_accessors() {
        let number = EvaluationValue::from(42);
        assert!(number.is_number());
        assert_eq!(number.as_number(), Some(&BigDecimal::from(42)));
        assert_eq!(number.as_boolean(), None);

        let null = EvaluationValue::null();
        assert!(null.is_null());
        assert_eq!(null.type_name(), "NULL");
    }

    #[test]
    fn test_display_array() {
        let array = EvaluationValue::array(vec![
            EvaluationValue::from(1),
            EvaluationValue::from("two"),
            EvaluationValue::boolean(true),
        ]);
        assert_eq!(array.to_string(), "[1, two, true]");
    }

    #[test]
    fn test_high_precision_numbers_survive() {
        let pi = BigDecimal::from_str(
            "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679",
        )
        .unwrap();
        let value = EvaluationValue::number(pi.clone());
        assert_eq!(value.as_number(), Some(&pi));
    }
}
