//! Value model and data access for expression evaluation
//!
//! The front end only constructs and inspects values (constants, variable
//! environments); arithmetic on them belongs to the evaluator.

pub mod accessor;
pub mod conversion;
pub mod time_series;
pub mod value;

pub use accessor::{DataAccessor, DataAccessorFactory, MapBasedDataAccessor};
pub use conversion::{ConversionError, DefaultEvaluationValueConverter, EvaluationValueConverter};
pub use time_series::TimeSeriesPoint;
pub use value::EvaluationValue;
