pub mod static_chain;

pub use static_chain::StaticChain;

use crate::util::{Address, BigInt};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The token a vToken market lends out. Markets for the native coin have none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingToken {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VTokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    #[serde(default)]
    pub underlying: Option<UnderlyingToken>,
    pub reserve_factor_mantissa: BigInt,
    pub interest_rate_model: Address,
}

/// Market state as read from the vToken contract at the head of the block.
/// Each field is its own view call; `None` means that call reverted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketSnapshot {
    pub accrual_block_number: Option<u64>,
    pub exchange_rate_mantissa: Option<BigInt>,
    pub borrow_index_mantissa: Option<BigInt>,
    pub reserves_mantissa: Option<BigInt>,
    pub total_borrows_mantissa: Option<BigInt>,
    pub total_supply_mantissa: Option<BigInt>,
    pub cash_mantissa: Option<BigInt>,
    pub borrow_rate_mantissa: Option<BigInt>,
    pub supply_rate_mantissa: Option<BigInt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolData {
    pub name: String,
    pub creator: Address,
    pub comptroller: Address,
    pub block_posted: u64,
    pub timestamp_posted: u64,
}

/// Contract view calls the host makes available to handlers.
///
/// A call that reverts, or that the host cannot answer, is an `Err`.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn vtoken_metadata(&self, vtoken: &Address) -> Result<VTokenMetadata>;

    async fn market_snapshot(&self, vtoken: &Address) -> Result<MarketSnapshot>;

    /// `vToken.balanceOf(account)`
    async fn balance_of(&self, vtoken: &Address, account: &Address) -> Result<BigInt>;

    /// `oracle.getUnderlyingPrice(vToken)`
    async fn underlying_price(&self, oracle: &Address, vtoken: &Address) -> Result<BigInt>;

    /// `poolRegistry.getPoolByID(index)`
    async fn pool_by_id(&self, registry: &Address, index: &BigInt) -> Result<PoolData>;
}
