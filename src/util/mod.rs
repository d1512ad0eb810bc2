pub mod address;
pub mod big_decimal;
pub mod big_int;
pub mod de;
pub mod ids;

pub use address::Address;
pub use big_decimal::BigDecimal;
pub use big_int::BigInt;

/// `10^decimals` as an integer, used to scale mantissas.
pub fn exponent_to_big_int(decimals: u32) -> BigInt {
    BigInt::from(num_bigint::BigInt::from(10u32).pow(decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponent_to_big_int() {
        assert_eq!(BigInt::one(), exponent_to_big_int(0));
        assert_eq!(
            "1000000000000000000".parse::<BigInt>().unwrap(),
            exponent_to_big_int(18)
        );
    }
}
