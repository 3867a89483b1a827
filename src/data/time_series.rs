//! The unit of the numeric time-series domain

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation of a numeric time series: a timestamp and its value.
///
/// The time-series functions (`MOVE`, `MA`) operate on sequences of these
/// downstream; the front end only carries them through the value model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    timestamp: DateTime<Utc>,
    value: BigDecimal,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, value: BigDecimal) -> Self {
        Self { timestamp, value }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn value(&self) -> &BigDecimal {
        &self.value
    }
}

impl fmt::Display for TimeSeriesPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.timestamp.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_point_accessors() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let point = TimeSeriesPoint::new(timestamp, BigDecimal::from(100));
        assert_eq!(point.timestamp(), timestamp);
        assert_eq!(point.value(), &BigDecimal::from(100));
        assert!(point.to_string().starts_with("100@2024-03-01"));
    }
}
