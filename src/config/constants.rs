//! Compile-time constants for the expression engine

pub mod compile_time {
    pub mod math {
        /// Default numeric precision in significant digits.
        /// Evaluation results never carry more digits than this.
        pub const DEFAULT_PRECISION: u64 = 68;

        /// Sentinel for "do not round results to a fixed number of decimal
        /// places"
        pub const DECIMAL_PLACES_ROUNDING_UNLIMITED: i32 = -1;

        /// PI to 100 decimal digits
        pub const PI: &str =
            "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

        /// Euler's number to 65 decimal digits
        pub const E: &str =
            "2.71828182845904523536028747135266249775724709369995957496696762772407663";
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::math;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn test_constant_digit_strings_parse() {
        assert!(BigDecimal::from_str(math::PI).is_ok());
        assert!(BigDecimal::from_str(math::E).is_ok());
    }

    #[test]
    fn test_constant_digit_counts() {
        // digits after the decimal point
        assert_eq!(math::PI.split('.').nth(1).unwrap().len(), 100);
        assert_eq!(math::E.split('.').nth(1).unwrap().len(), 65);
    }
}
