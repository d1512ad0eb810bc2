use crate::util::Address;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub number: u64,
    pub timestamp: u64,
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub hash: String,
    #[serde(default)]
    pub from: Option<Address>,
}

/// A contract log as decoded by the indexing host.
///
/// `params` holds the named event arguments. Handlers decode them into their
/// own typed structs with [`LogEvent::decode`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub data_source: String,
    pub name: String,
    pub address: Address,
    pub block: BlockInfo,
    pub transaction: TransactionInfo,
    pub log_index: u64,
    #[serde(default)]
    pub params: Value,
}

impl LogEvent {
    /// `<DataSource>.<Event>`, the key indexers register under.
    pub fn registry_key(&self) -> String {
        format!("{}.{}", self.data_source, self.name)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        serde_json::from_value(self.params.clone())
            .with_context(|| format!("decoding params of {}", self.registry_key()))
    }
}

#[cfg(test)]
impl LogEvent {
    pub fn mock(data_source: &str, name: &str, address: &Address, params: Value) -> Self {
        LogEvent {
            data_source: data_source.to_string(),
            name: name.to_string(),
            address: address.clone(),
            block: BlockInfo {
                number: 1,
                timestamp: 1,
                hash: None,
            },
            transaction: TransactionInfo {
                hash: "0xa16081f360e3847006db660bae1c6d1b2e17ec2a".to_string(),
                from: None,
            },
            log_index: 1,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::BigInt;
    use serde_json::json;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct NewCloseFactor {
        new_close_factor_mantissa: BigInt,
    }

    #[test]
    fn test_decode_params() -> anyhow::Result<()> {
        let event: LogEvent = serde_json::from_value(json!({
            "dataSource": "Comptroller",
            "name": "NewCloseFactor",
            "address": "0xfD36E2c2a6789Db23113685031d7F16329158384",
            "block": { "number": 7, "timestamp": 1600000000 },
            "transaction": { "hash": "0xabc" },
            "logIndex": 3,
            "params": {
                "oldCloseFactorMantissa": "0",
                "newCloseFactorMantissa": "500000000000000000"
            }
        }))?;
        assert_eq!("Comptroller.NewCloseFactor", event.registry_key());
        assert_eq!(
            "0xfd36e2c2a6789db23113685031d7f16329158384",
            event.address.as_str()
        );
        let params: NewCloseFactor = event.decode()?;
        assert_eq!(
            "500000000000000000".parse::<BigInt>()?,
            params.new_close_factor_mantissa
        );
        Ok(())
    }

    #[test]
    fn test_decode_rejects_missing_params() {
        let event = LogEvent::mock("Comptroller", "NewCloseFactor", &Address::zero(), json!({}));
        assert!(event.decode::<NewCloseFactor>().is_err());
    }
}
