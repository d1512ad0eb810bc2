use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Small enum-like event arguments (`uint8` in the ABI). Hosts emit them as
/// JSON numbers or as decimal strings, the same way they emit `BigInt`s.
struct SmallIntVisitor;

impl<'de> Visitor<'de> for SmallIntVisitor {
    type Value = u8;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer between 0 and 255 or its decimal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u8, E> {
        u8::try_from(value).map_err(|_| E::custom(format!("{} is out of range", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u8, E> {
        u8::try_from(value).map_err(|_| E::custom(format!("{} is out of range", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u8, E> {
        value
            .trim()
            .parse::<u8>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

pub fn small_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    deserializer.deserialize_any(SmallIntVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Support {
        #[serde(deserialize_with = "small_int")]
        support: u8,
    }

    #[test]
    fn test_small_int_accepts_numbers_and_strings() {
        let number: Support = serde_json::from_str(r#"{"support": 2}"#).unwrap();
        let string: Support = serde_json::from_str(r#"{"support": " 2"}"#).unwrap();
        assert_eq!(2, number.support);
        assert_eq!(2, string.support);
        assert!(serde_json::from_str::<Support>(r#"{"support": "for"}"#).is_err());
        assert!(serde_json::from_str::<Support>(r#"{"support": 256}"#).is_err());
    }
}
