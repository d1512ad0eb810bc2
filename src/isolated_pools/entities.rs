use crate::entity;
use crate::util::{Address, BigInt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An isolated lending pool, keyed by its comptroller address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub creator: Address,
    pub block_posted: u64,
    pub timestamp_posted: u64,
    pub price_oracle: Option<Address>,
    pub close_factor_mantissa: BigInt,
    pub liquidation_incentive_mantissa: BigInt,
    pub min_liquidatable_collateral_mantissa: BigInt,
    pub pause_guardian: Option<Address>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub pool: String,
    pub name: String,
    pub symbol: String,
    pub v_token_decimals: u32,
    pub underlying_address: Address,
    pub underlying_name: String,
    pub underlying_symbol: String,
    pub underlying_decimals: u32,
    pub collateral_factor_mantissa: BigInt,
    pub borrow_cap_mantissa: Option<BigInt>,
    pub min_liquidatable_amount_mantissa: BigInt,
    pub reserve_factor_mantissa: BigInt,
    pub interest_rate_model_address: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountVToken {
    pub id: String,
    pub market: String,
    pub account: String,
    pub entered_market: bool,
    pub accrual_block_number: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolAction {
    pub id: String,
    pub pool: String,
    pub action: String,
    pub pause_state: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketAction {
    pub id: String,
    pub v_token: String,
    pub action: String,
    pub pause_state: bool,
}

entity!(Pool, "Pool");
entity!(Market, "Market");
entity!(Account, "Account");
entity!(AccountVToken, "AccountVToken");
entity!(PoolAction, "PoolAction");
entity!(MarketAction, "MarketAction");
