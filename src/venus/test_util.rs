use super::{subgraph, COMPTROLLER_DATA_SOURCE, VTOKEN_TEMPLATE, VTOKEN_UPDATED_EVENTS_TEMPLATE};
use crate::chain::{MarketSnapshot, StaticChain, UnderlyingToken, VTokenMetadata};
use crate::db::MemoryPersister;
use crate::indexing::{LogEvent, Subgraph};
use crate::util::{Address, BigInt};
use serde_json::{json, Value};

pub const VUSDC: &str = "0xeca88125a5adbe82614ffc12d0db554e2e2867c8";
pub const USDC: &str = "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d";
pub const VBNB: &str = "0xa07c5b74c9b40447a954e1466938b865b6bbea36";
pub const AAA_VTOKEN: &str = "0x0000000000000000000000000000000000000aaa";
pub const AAA_TOKEN: &str = "0x0000000000000000000000000000000000000b0b";
pub const INTEREST_RATE_MODEL: &str = "0x594942c0e62ec577889777424cd367545c796a74";
pub const ORACLE: &str = "0x0000000000000000000000000000000000000c0c";
pub const USER_1: &str = "0x0000000000000000000000000000000000000101";
pub const USER_2: &str = "0x0000000000000000000000000000000000000202";
pub const USER_3: &str = "0x0000000000000000000000000000000000000303";
pub const USER_4: &str = "0x0000000000000000000000000000000000000404";

pub fn address(raw: &str) -> Address {
    raw.parse().unwrap()
}

pub fn big(raw: &str) -> BigInt {
    raw.parse().unwrap()
}

fn metadata(name: &str, symbol: &str, underlying: Option<UnderlyingToken>) -> VTokenMetadata {
    VTokenMetadata {
        name: name.to_string(),
        symbol: symbol.to_string(),
        decimals: 8,
        underlying,
        reserve_factor_mantissa: BigInt::from(100),
        interest_rate_model: address(INTEREST_RATE_MODEL),
    }
}

fn underlying(token: &str, name: &str, symbol: &str) -> Option<UnderlyingToken> {
    Some(UnderlyingToken {
        address: address(token),
        name: name.to_string(),
        symbol: symbol.to_string(),
        decimals: 18,
    })
}

/// Market state returned for every vToken of the fixture.
pub fn snapshot() -> MarketSnapshot {
    MarketSnapshot {
        accrual_block_number: Some(999),
        exchange_rate_mantissa: Some(big("365045823500000000000000")),
        borrow_index_mantissa: Some(big("300000000000000000000")),
        reserves_mantissa: Some(big("5128924555022289393")),
        total_borrows_mantissa: Some(big("2641234234636158123")),
        total_supply_mantissa: Some(big("36152258450135")),
        cash_mantissa: Some(big("1418171344423412457")),
        borrow_rate_mantissa: Some(big("12678493")),
        supply_rate_mantissa: Some(big("12678493")),
    }
}

/// Fixture chain whose market state calls all revert.
pub fn chain_without_snapshots() -> StaticChain {
    let mut chain = StaticChain::new();
    chain
        .set_vtoken_metadata(
            address(VUSDC),
            metadata("Venus USD Coin", "vUSDC", underlying(USDC, "USD Coin", "USDC")),
        )
        .set_vtoken_metadata(address(VBNB), metadata("Venus BNB", "vBNB", None))
        .set_vtoken_metadata(
            address(AAA_VTOKEN),
            metadata("Venus AAA Coin", "vAAA", underlying(AAA_TOKEN, "AAA Coin", "AAA")),
        );
    chain
}

pub fn chain() -> StaticChain {
    let mut chain = chain_without_snapshots();
    for vtoken in [VUSDC, VBNB, AAA_VTOKEN] {
        chain.set_market_snapshot(address(vtoken), snapshot());
    }
    chain
}

pub fn setup() -> (Subgraph, StaticChain) {
    (subgraph(Box::new(MemoryPersister::new())), chain())
}

pub fn comptroller_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(COMPTROLLER_DATA_SOURCE, name, &Address::zero(), params)
}

pub fn market_listed_event(vtoken: &Address) -> LogEvent {
    comptroller_event("MarketListed", json!({ "vToken": vtoken }))
}

pub fn vtoken_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(VTOKEN_TEMPLATE, name, &address(AAA_VTOKEN), params)
}

pub fn updated_vtoken_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(VTOKEN_UPDATED_EVENTS_TEMPLATE, name, &address(AAA_VTOKEN), params)
}
