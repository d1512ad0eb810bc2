use anyhow::anyhow;
use num_bigint::Sign;
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// Arbitrary precision signed integer used for token amounts, mantissas and
/// counters. Serialized as a decimal string so it survives JSON and text
/// columns without losing precision.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    pub fn zero() -> Self {
        BigInt::default()
    }

    pub fn one() -> Self {
        BigInt::from(1u32)
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// Integer division truncating toward zero. `None` when dividing by zero.
    pub fn checked_div(&self, rhs: &BigInt) -> Option<BigInt> {
        if rhs.is_zero() {
            return None;
        }
        Some(BigInt(&self.0 / &rhs.0))
    }

    pub fn inner(&self) -> &num_bigint::BigInt {
        &self.0
    }
}

macro_rules! big_int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(value: $t) -> Self {
                    BigInt(num_bigint::BigInt::from(value))
                }
            }
        )*
    };
}

big_int_from!(i32, i64, u32, u64, u128);

impl From<num_bigint::BigInt> for BigInt {
    fn from(value: num_bigint::BigInt) -> Self {
        BigInt(value)
    }
}

impl FromStr for BigInt {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => num_bigint::BigInt::parse_bytes(hex.as_bytes(), 16),
            None => num_bigint::BigInt::parse_bytes(trimmed.as_bytes(), 10),
        };
        parsed
            .map(BigInt)
            .ok_or_else(|| anyhow!("invalid integer: {:?}", s))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a> Add<&'a BigInt> for &'a BigInt {
    type Output = BigInt;

    fn add(self, rhs: &'a BigInt) -> BigInt {
        BigInt(&self.0 + &rhs.0)
    }
}

impl<'a> Sub<&'a BigInt> for &'a BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &'a BigInt) -> BigInt {
        BigInt(&self.0 - &rhs.0)
    }
}

impl<'a> Mul<&'a BigInt> for &'a BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &'a BigInt) -> BigInt {
        BigInt(&self.0 * &rhs.0)
    }
}

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &BigInt) {
        self.0 += &rhs.0;
    }
}

impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: &BigInt) {
        self.0 -= &rhs.0;
    }
}

impl AddAssign<i64> for BigInt {
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl SubAssign<i64> for BigInt {
    fn sub_assign(&mut self, rhs: i64) {
        self.0 -= rhs;
    }
}

impl Serialize for BigInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct BigIntVisitor;

impl<'de> Visitor<'de> for BigIntVisitor {
    type Value = BigInt;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or an integer string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<BigInt, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<BigInt, E> {
        Ok(BigInt::from(value))
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigIntVisitor)
    }
}

impl JsonSchema for BigInt {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        "BigInt".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("bigint".to_string()),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        let decimal: BigInt = "365045823500000000000000".parse().unwrap();
        assert_eq!("365045823500000000000000", decimal.to_string());
        let hex: BigInt = "0xff".parse().unwrap();
        assert_eq!(BigInt::from(255), hex);
        assert!("12a".parse::<BigInt>().is_err());
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_number: BigInt = serde_json::from_str("42").unwrap();
        let from_string: BigInt = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!("\"42\"", serde_json::to_string(&from_number).unwrap());
    }

    #[test]
    fn test_arithmetic() {
        let mut count = BigInt::zero();
        count += 1;
        count += 1;
        count -= 1;
        assert_eq!(BigInt::one(), count);
        let product = &BigInt::from(6) * &BigInt::from(7);
        assert_eq!(Some(BigInt::from(14)), product.checked_div(&BigInt::from(3)));
        assert_eq!(None, product.checked_div(&BigInt::zero()));
        assert!((&BigInt::zero() - &BigInt::one()) < BigInt::zero());
    }
}
