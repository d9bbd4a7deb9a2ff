// Karatsuba multiplication: operand parsing, traced engine, HTTP handler.

pub mod handlers;
pub mod karatsuba;
pub mod operand;

use num_bigint::BigUint;
use serde::Serializer;

/// Number of decimal digits; zero has one digit.
pub fn digit_count(value: &BigUint) -> usize {
    value.to_str_radix(10).len()
}

/// Writes a big integer as a JSON string so no client truncates it to a float.
pub fn serialize_decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(&BigUint::from(0u32)), 1);
        assert_eq!(digit_count(&BigUint::from(9u32)), 1);
        assert_eq!(digit_count(&BigUint::from(10u32)), 2);
        assert_eq!(digit_count(&BigUint::from(10u32).pow(40)), 41);
    }
}
