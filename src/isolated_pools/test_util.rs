use super::{subgraph, POOL_REGISTRY_DATA_SOURCE, POOL_TEMPLATE};
use crate::chain::{StaticChain, UnderlyingToken, VTokenMetadata};
use crate::db::MemoryPersister;
use crate::indexing::{LogEvent, Subgraph};
use crate::util::{Address, BigInt};
use serde_json::{json, Value};

pub const POOL_REGISTRY: &str = "0x9f7b01a536aff5a2432b9f6ab7a1e0c1e0d6c7e4";
pub const COMPTROLLER: &str = "0x0000000000000000000000000000000000000c01";
pub const CREATOR: &str = "0x0000000000000000000000000000000000000c02";
pub const VTOKEN: &str = "0x0000000000000000000000000000000000000d01";
pub const BTC: &str = "0x0000000000000000000000000000000000000d02";
pub const ORACLE: &str = "0x0000000000000000000000000000000000000c0c";
pub const INTEREST_RATE_MODEL: &str = "0x0000000000000000000000000000000000000e01";
pub const USER: &str = "0x0000000000000000000000000000000000000101";

pub fn address(raw: &str) -> Address {
    raw.parse().unwrap()
}

pub fn chain() -> StaticChain {
    let mut chain = StaticChain::new();
    chain.set_vtoken_metadata(
        address(VTOKEN),
        VTokenMetadata {
            name: "Venus BTC (Pool 1)".to_string(),
            symbol: "vBTC".to_string(),
            decimals: 8,
            underlying: Some(UnderlyingToken {
                address: address(BTC),
                name: "Bitcoin".to_string(),
                symbol: "BTC".to_string(),
                decimals: 18,
            }),
            reserve_factor_mantissa: BigInt::from(100),
            interest_rate_model: address(INTEREST_RATE_MODEL),
        },
    );
    chain
}

pub fn setup() -> (Subgraph, StaticChain) {
    (subgraph(Box::new(MemoryPersister::new())), chain())
}

pub fn registry_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(POOL_REGISTRY_DATA_SOURCE, name, &address(POOL_REGISTRY), params)
}

pub fn pool_registered_event() -> LogEvent {
    registry_event(
        "PoolRegistered",
        json!({
            "comptroller": COMPTROLLER,
            "pool": {
                "name": "Pool 1",
                "creator": CREATOR,
                "comptroller": COMPTROLLER,
                "blockPosted": 20,
                "timestampPosted": 1000
            }
        }),
    )
}

pub fn pool_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(POOL_TEMPLATE, name, &address(COMPTROLLER), params)
}
